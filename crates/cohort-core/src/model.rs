use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoResult, EngineError};

/// The four attribute families the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKind {
    Enum,
    Number,
    Attractive,
    Repulsive,
}

/// A named, typed field defined once per collection of elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
    /// Enum attributes only; must hold at least one option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Attribute {
    pub fn validate(&self) -> CoResult<()> {
        match self.kind {
            AttributeKind::Enum if self.options.is_empty() => Err(EngineError::InvalidInput {
                reason: format!("enum attribute '{}' needs at least one option", self.name),
            }),
            AttributeKind::Attractive | AttributeKind::Repulsive if self.required => {
                Err(EngineError::InvalidInput {
                    reason: format!(
                        "attribute '{}' cannot be required: presence attributes are optional by nature",
                        self.name
                    ),
                })
            }
            AttributeKind::Number => {
                if let (Some(min), Some(max)) = (self.min, self.max) {
                    if min > max {
                        return Err(EngineError::InvalidInput {
                            reason: format!(
                                "attribute '{}' has min {} above max {}",
                                self.name, min, max
                            ),
                        });
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// A scalar value an element carries for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Num(f64),
    Text(String),
}

impl AttributeValue {
    /// Canonical comparison key. `None` means "carries no value": empty
    /// strings and unset flags never participate in grouping decisions.
    pub fn grouping_key(&self) -> Option<String> {
        match self {
            AttributeValue::Flag(false) => None,
            AttributeValue::Flag(true) => Some("true".to_string()),
            AttributeValue::Num(n) => Some(format!("{}", n)),
            AttributeValue::Text(s) if s.is_empty() => None,
            AttributeValue::Text(s) => Some(s.clone()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Num(n) => Some(*n),
            _ => None,
        }
    }
}

/// An item to distribute into groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: HashMap<String, AttributeValue>,
}

impl Element {
    pub fn grouping_key(&self, attribute_id: &str) -> Option<String> {
        self.values
            .get(attribute_id)
            .and_then(AttributeValue::grouping_key)
    }

    pub fn number(&self, attribute_id: &str) -> Option<f64> {
        self.values.get(attribute_id).and_then(AttributeValue::as_number)
    }
}

/// How an enum constraint acts on its attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EnumMode {
    /// Spread every value evenly across groups, within the given budget.
    Balance { allowed_divergence: f64 },
    /// Keep each group pure: one distinct value per group.
    Exclude {
        #[serde(default)]
        mandatory: bool,
    },
}

/// A rule applied during generation and validation.
///
/// `number` and `default` constraints are never mandatory by construction;
/// the other kinds carry an explicit flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Constraint {
    Enum {
        attribute_id: String,
        #[serde(flatten)]
        mode: EnumMode,
    },
    Number {
        attribute_id: String,
        balance_average: bool,
        allowed_divergence: f64,
    },
    Attractive {
        attribute_id: String,
        #[serde(default)]
        mandatory: bool,
    },
    Repulsive {
        attribute_id: String,
        #[serde(default)]
        mandatory: bool,
    },
    Default {
        balance_group_sizes: bool,
        allowed_divergence: f64,
    },
}

impl Constraint {
    pub fn attribute_id(&self) -> Option<&str> {
        match self {
            Constraint::Enum { attribute_id, .. }
            | Constraint::Number { attribute_id, .. }
            | Constraint::Attractive { attribute_id, .. }
            | Constraint::Repulsive { attribute_id, .. } => Some(attribute_id),
            Constraint::Default { .. } => None,
        }
    }

    pub fn is_mandatory(&self) -> bool {
        match self {
            Constraint::Enum {
                mode: EnumMode::Exclude { mandatory },
                ..
            } => *mandatory,
            Constraint::Attractive { mandatory, .. }
            | Constraint::Repulsive { mandatory, .. } => *mandatory,
            _ => false,
        }
    }

    /// The divergence budget, for the kinds that define one.
    pub fn allowed_divergence(&self) -> Option<f64> {
        match self {
            Constraint::Enum {
                mode: EnumMode::Balance { allowed_divergence },
                ..
            }
            | Constraint::Number {
                allowed_divergence, ..
            }
            | Constraint::Default {
                allowed_divergence, ..
            } => Some(*allowed_divergence),
            _ => None,
        }
    }

    /// Short display label for reports and logs.
    pub fn label(&self, attributes: &[Attribute]) -> String {
        let attr_name = |id: &str| {
            attributes
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        match self {
            Constraint::Enum {
                attribute_id,
                mode: EnumMode::Balance { .. },
            } => format!("balance of '{}'", attr_name(attribute_id)),
            Constraint::Enum {
                attribute_id,
                mode: EnumMode::Exclude { .. },
            } => format!("exclusion by '{}'", attr_name(attribute_id)),
            Constraint::Number { attribute_id, .. } => {
                format!("average of '{}'", attr_name(attribute_id))
            }
            Constraint::Attractive { attribute_id, .. } => {
                format!("attraction on '{}'", attr_name(attribute_id))
            }
            Constraint::Repulsive { attribute_id, .. } => {
                format!("repulsion on '{}'", attr_name(attribute_id))
            }
            Constraint::Default { .. } => "group sizes".to_string(),
        }
    }
}

/// A set of member element ids. Modeled as a sequence, treated as a set:
/// an element belongs to at most one group within one grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// A named, timestamped result record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub id: String,
    pub name: String,
    pub created_at: u64,
    pub constraints: Vec<Constraint>,
    pub groups: Vec<Group>,
    pub elements: Vec<Element>,
    pub attributes: Vec<Attribute>,
}

impl Distribution {
    /// Freezes copies of the live element/attribute sets alongside the
    /// result, so later edits cannot retroactively change the record.
    pub fn snapshot(
        id: &str,
        name: &str,
        created_at: u64,
        constraints: &[Constraint],
        groups: &[Group],
        elements: &[Element],
        attributes: &[Attribute],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            created_at,
            constraints: constraints.to_vec(),
            groups: groups.to_vec(),
            elements: elements.to_vec(),
            attributes: attributes.to_vec(),
        }
    }
}

/// Structural lint over a constraint set. Problems are reported, not fatal:
/// the scoring paths skip constraints they cannot resolve.
pub fn validate_constraints(constraints: &[Constraint], attributes: &[Attribute]) -> Vec<String> {
    let mut problems = Vec::new();
    for constraint in constraints {
        if let Some(id) = constraint.attribute_id() {
            match attributes.iter().find(|a| a.id == id) {
                None => problems.push(format!(
                    "constraint references unknown attribute '{}'",
                    id
                )),
                Some(attribute) => {
                    let expected = match constraint {
                        Constraint::Enum { .. } => AttributeKind::Enum,
                        Constraint::Number { .. } => AttributeKind::Number,
                        Constraint::Attractive { .. } => AttributeKind::Attractive,
                        Constraint::Repulsive { .. } => AttributeKind::Repulsive,
                        Constraint::Default { .. } => unreachable!("default has no attribute"),
                    };
                    if attribute.kind != expected {
                        problems.push(format!(
                            "{} targets '{}', which is not a {:?} attribute",
                            constraint.label(attributes),
                            attribute.name,
                            expected
                        ));
                    }
                }
            }
        }
        if let Some(allowed) = constraint.allowed_divergence() {
            if !(0.0..=1.0).contains(&allowed) {
                problems.push(format!(
                    "{}: allowed divergence {} is outside [0, 1]",
                    constraint.label(attributes),
                    allowed
                ));
            }
        }
    }
    problems
}
