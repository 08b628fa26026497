#![allow(dead_code)]

use std::collections::HashMap;

use cohort_core::model::{Attribute, AttributeKind, AttributeValue, Element, Group};

pub fn enum_attribute(id: &str, name: &str, options: &[&str]) -> Attribute {
    Attribute {
        id: id.to_string(),
        name: name.to_string(),
        kind: AttributeKind::Enum,
        required: false,
        options: options.iter().map(|s| s.to_string()).collect(),
        min: None,
        max: None,
    }
}

pub fn number_attribute(id: &str, name: &str) -> Attribute {
    Attribute {
        id: id.to_string(),
        name: name.to_string(),
        kind: AttributeKind::Number,
        required: false,
        options: Vec::new(),
        min: None,
        max: None,
    }
}

pub fn attractive_attribute(id: &str, name: &str) -> Attribute {
    Attribute {
        id: id.to_string(),
        name: name.to_string(),
        kind: AttributeKind::Attractive,
        required: false,
        options: Vec::new(),
        min: None,
        max: None,
    }
}

pub fn repulsive_attribute(id: &str, name: &str) -> Attribute {
    Attribute {
        id: id.to_string(),
        name: name.to_string(),
        kind: AttributeKind::Repulsive,
        required: false,
        options: Vec::new(),
        min: None,
        max: None,
    }
}

/// Builder for Element to clean up tests
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            element: Element {
                id: id.to_string(),
                name: id.to_string(),
                values: HashMap::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.element.name = name.to_string();
        self
    }

    pub fn text(mut self, attribute_id: &str, value: &str) -> Self {
        self.element.values.insert(
            attribute_id.to_string(),
            AttributeValue::Text(value.to_string()),
        );
        self
    }

    pub fn num(mut self, attribute_id: &str, value: f64) -> Self {
        self.element
            .values
            .insert(attribute_id.to_string(), AttributeValue::Num(value));
        self
    }

    pub fn flag(mut self, attribute_id: &str) -> Self {
        self.element
            .values
            .insert(attribute_id.to_string(), AttributeValue::Flag(true));
        self
    }

    pub fn build(self) -> Element {
        self.element
    }
}

pub fn element(id: &str) -> ElementBuilder {
    ElementBuilder::new(id)
}

pub fn group(id: &str, members: &[&str]) -> Group {
    Group {
        id: id.to_string(),
        name: id.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

/// Index of the group holding the given element id.
pub fn group_of(groups: &[Group], element_id: &str) -> Option<usize> {
    groups
        .iter()
        .position(|g| g.members.iter().any(|m| m == element_id))
}

/// All member ids across all groups, sorted.
pub fn all_members(groups: &[Group]) -> Vec<String> {
    let mut ids: Vec<String> = groups.iter().flat_map(|g| g.members.clone()).collect();
    ids.sort();
    ids
}
