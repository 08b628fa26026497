//! Live constraint validation for existing groupings.
//!
//! Mirrors the penalty model's measurements but emits human-readable
//! diagnostics, with widened tolerances so statistical noise near a
//! threshold does not flag. Also serves as the feasibility oracle for the
//! placement solver when restricted to the mandatory subset.

use serde::{Deserialize, Serialize};

use crate::model::{Attribute, Constraint, Element, EnumMode, Group};
use crate::scale::DivergenceLevel;
use crate::scorer::metrics;

/// Tolerance added on top of the configured divergence budget for balance
/// checks, absorbing level-rounding noise.
pub const BALANCE_EPSILON: f64 = 0.125;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Satisfaction {
    pub satisfied: bool,
    pub issues: Vec<String>,
}

/// Evaluates every constraint (mandatory or not) against the given
/// grouping. Never fails: unresolvable attributes contribute nothing.
pub fn check_satisfaction(
    groups: &[Group],
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
) -> Satisfaction {
    let mut issues = Vec::new();
    for constraint in constraints {
        check_constraint(constraint, groups, elements, attributes, &mut issues);
    }
    Satisfaction {
        satisfied: issues.is_empty(),
        issues,
    }
}

/// The subset of constraints the placement solver must honor.
pub fn mandatory_only(constraints: &[Constraint]) -> Vec<Constraint> {
    constraints
        .iter()
        .filter(|c| c.is_mandatory())
        .cloned()
        .collect()
}

fn check_constraint(
    constraint: &Constraint,
    groups: &[Group],
    elements: &[Element],
    attributes: &[Attribute],
    issues: &mut Vec<String>,
) {
    match constraint {
        Constraint::Enum { attribute_id, mode } => {
            let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
                return;
            };
            match mode {
                EnumMode::Balance { allowed_divergence } => {
                    for d in metrics::enum_count_divergences(groups, elements, attribute_id) {
                        if d.actual > allowed_divergence + BALANCE_EPSILON {
                            issues.push(format!(
                                "Value '{}' of '{}' is spread unevenly: divergence {:.2} exceeds the allowed {:.2}",
                                d.value, attribute.name, d.actual, allowed_divergence
                            ));
                        }
                    }
                }
                EnumMode::Exclude { .. } => {
                    for mixed in metrics::exclude_census(groups, elements, attribute_id).mixed_groups
                    {
                        issues.push(format!(
                            "Group '{}' mixes values of '{}': {}",
                            group_name(groups, mixed.group_index),
                            attribute.name,
                            mixed.values.join(", ")
                        ));
                    }
                }
            }
        }
        Constraint::Number {
            attribute_id,
            balance_average,
            allowed_divergence,
        } => {
            if !*balance_average {
                return;
            }
            let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
                return;
            };
            if let Some(actual) = metrics::average_divergence(groups, elements, attribute_id) {
                if actual > allowed_divergence + BALANCE_EPSILON {
                    issues.push(format!(
                        "Group averages of '{}' diverge by {:.2}, allowed {:.2}",
                        attribute.name, actual, allowed_divergence
                    ));
                }
            }
        }
        Constraint::Attractive { attribute_id, .. } => {
            let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
                return;
            };
            for split in metrics::spread_census(groups, elements, attribute_id).split_values {
                issues.push(format!(
                    "Elements sharing '{}' of '{}' sit in {} different groups",
                    split.value, attribute.name, split.span
                ));
            }
        }
        Constraint::Repulsive { attribute_id, .. } => {
            let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
                return;
            };
            for clash in metrics::duplicate_census(groups, elements, attribute_id).clashes {
                issues.push(format!(
                    "Group '{}' holds '{}' of '{}' {} times",
                    group_name(groups, clash.group_index),
                    clash.value,
                    attribute.name,
                    clash.count
                ));
            }
        }
        Constraint::Default {
            balance_group_sizes,
            allowed_divergence,
        } => {
            if !*balance_group_sizes {
                return;
            }
            if let Some(actual) = metrics::size_divergence(groups, elements.len()) {
                // Level equality suppresses the flag even when the raw ratio
                // exceeds the budget.
                let same_level = DivergenceLevel::from_value(actual)
                    == DivergenceLevel::from_value(*allowed_divergence);
                if actual > *allowed_divergence && !same_level {
                    issues.push(format!(
                        "Group sizes diverge by {:.2}, allowed {:.2}",
                        actual, allowed_divergence
                    ));
                }
            }
        }
    }
}

fn group_name(groups: &[Group], index: usize) -> &str {
    groups.get(index).map(|g| g.name.as_str()).unwrap_or("?")
}
