//! The penalty model: one non-negative scalar for how badly a grouping
//! violates the non-mandatory constraints.
//!
//! Mandatory constraints never contribute here; the placement solver
//! enforces them structurally.

pub mod metrics;

use crate::model::{Attribute, Constraint, Element, EnumMode, Group};

/// Weight applied to constraints that carry no divergence budget.
pub const DEFAULT_IMPORTANCE: f64 = 0.8;

/// One constraint's contribution to the global penalty.
#[derive(Debug, Clone)]
pub struct ConstraintPenalty {
    pub label: String,
    pub raw: f64,
    pub importance: f64,
}

impl ConstraintPenalty {
    pub fn weighted(&self) -> f64 {
        self.raw * self.importance
    }
}

/// Weighted sum of per-constraint penalties over the non-mandatory
/// constraints. Pure: no randomness, no side effects, never fails.
pub fn global_penalty(
    groups: &[Group],
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
) -> f64 {
    penalty_details(groups, elements, constraints, attributes)
        .iter()
        .map(ConstraintPenalty::weighted)
        .sum()
}

/// Per-constraint breakdown behind [`global_penalty`]. Constraints whose
/// attribute cannot be resolved are skipped.
pub fn penalty_details(
    groups: &[Group],
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
) -> Vec<ConstraintPenalty> {
    constraints
        .iter()
        .filter(|c| !c.is_mandatory())
        .filter_map(|c| {
            let raw = constraint_penalty(c, groups, elements, attributes)?;
            let importance = c
                .allowed_divergence()
                .map_or(DEFAULT_IMPORTANCE, |d| 1.0 - d);
            Some(ConstraintPenalty {
                label: c.label(attributes),
                raw,
                importance,
            })
        })
        .collect()
}

fn constraint_penalty(
    constraint: &Constraint,
    groups: &[Group],
    elements: &[Element],
    attributes: &[Attribute],
) -> Option<f64> {
    match constraint {
        Constraint::Enum { attribute_id, mode } => {
            metrics::find_attribute(attributes, attribute_id)?;
            match mode {
                EnumMode::Balance { allowed_divergence } => {
                    let overflow: f64 = metrics::enum_count_divergences(groups, elements, attribute_id)
                        .iter()
                        .map(|d| (d.actual - allowed_divergence).max(0.0))
                        .sum();
                    Some(overflow)
                }
                EnumMode::Exclude { .. } => {
                    let census = metrics::exclude_census(groups, elements, attribute_id);
                    Some(ratio(census.intruder_count, census.carrier_count))
                }
            }
        }
        Constraint::Number {
            attribute_id,
            balance_average,
            allowed_divergence,
        } => {
            metrics::find_attribute(attributes, attribute_id)?;
            if !*balance_average {
                return Some(0.0);
            }
            let actual = metrics::average_divergence(groups, elements, attribute_id).unwrap_or(0.0);
            Some((actual - allowed_divergence).max(0.0))
        }
        Constraint::Attractive { attribute_id, .. } => {
            metrics::find_attribute(attributes, attribute_id)?;
            let census = metrics::spread_census(groups, elements, attribute_id);
            Some(ratio(census.intruder_count, census.carrier_count))
        }
        Constraint::Repulsive { attribute_id, .. } => {
            metrics::find_attribute(attributes, attribute_id)?;
            let census = metrics::duplicate_census(groups, elements, attribute_id);
            Some(ratio(census.intruder_count, census.carrier_count))
        }
        Constraint::Default {
            balance_group_sizes,
            allowed_divergence,
        } => {
            if !*balance_group_sizes {
                return Some(0.0);
            }
            let actual = metrics::size_divergence(groups, elements.len()).unwrap_or(0.0);
            Some((actual - allowed_divergence).max(0.0))
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
