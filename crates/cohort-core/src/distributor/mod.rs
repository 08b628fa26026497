//! Phased construction of a grouping: mandatory placement, greedy fill,
//! then a randomized swap search. Every phase treats its input groups as an
//! immutable value and returns fresh structures.

pub mod fill;
pub mod mandatory;
pub mod swaps;

pub use fill::fill_unbound;
pub use mandatory::{place_with_mandatory, validate_mandatory_constraints, Placement};
pub use swaps::improve_by_swaps;

use std::collections::HashSet;

use crate::checker::mandatory_only;
use crate::model::{Attribute, Constraint, Element, Group};
use crate::scorer::metrics;

pub(crate) fn empty_groups(count: usize) -> Vec<Group> {
    (1..=count)
        .map(|i| Group {
            id: format!("group-{}", i),
            name: format!("Group {}", i),
            members: Vec::new(),
        })
        .collect()
}

/// Ids of elements touched by at least one resolvable mandatory constraint.
/// These are placed by the solver and stay immobile through the swap phase.
pub(crate) fn bound_ids(
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
) -> HashSet<String> {
    let mut ids = HashSet::new();
    for constraint in mandatory_only(constraints) {
        let Some(attribute_id) = constraint.attribute_id() else {
            continue;
        };
        if metrics::find_attribute(attributes, attribute_id).is_none() {
            continue;
        }
        for element in elements {
            if element.grouping_key(attribute_id).is_some() {
                ids.insert(element.id.clone());
            }
        }
    }
    ids
}
