use std::collections::HashMap;

use fastrand::Rng;
use itertools::Itertools;
use tracing::debug;

use crate::checker::{check_satisfaction, mandatory_only};
use crate::config::SolverParams;
use crate::error::{CoResult, EngineError};
use crate::model::{Attribute, Constraint, Element, EnumMode, Group};
use crate::scorer::metrics;

use super::{bound_ids, empty_groups};

/// Output of the hard-constraint phase: partially filled groups plus the
/// elements left for the greedy fill.
#[derive(Debug, Clone)]
pub struct Placement {
    pub groups: Vec<Group>,
    pub remaining: Vec<Element>,
}

/// Canonical unordered pair of element ids, mapped to the reason the pair
/// is forced together or apart.
type PairMap = HashMap<(String, String), String>;

fn ordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Elements carrying each distinct value, in first-seen order.
fn value_holders<'a>(elements: &'a [Element], attribute_id: &str) -> Vec<(String, Vec<&'a Element>)> {
    let mut holders: Vec<(String, Vec<&Element>)> = Vec::new();
    for element in elements {
        let Some(key) = element.grouping_key(attribute_id) else {
            continue;
        };
        match holders.iter_mut().find(|(value, _)| *value == key) {
            Some((_, bucket)) => bucket.push(element),
            None => holders.push((key, vec![element])),
        }
    }
    holders
}

fn together_pairs(
    elements: &[Element],
    mandatory: &[Constraint],
    attributes: &[Attribute],
) -> PairMap {
    let mut pairs = PairMap::new();
    for constraint in mandatory {
        let Constraint::Attractive { attribute_id, .. } = constraint else {
            continue;
        };
        let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
            continue;
        };
        for (value, holders) in value_holders(elements, attribute_id) {
            for (a, b) in holders.iter().tuple_combinations() {
                pairs.insert(
                    ordered(&a.id, &b.id),
                    format!("both carry '{}' of '{}'", value, attribute.name),
                );
            }
        }
    }
    pairs
}

fn apart_pairs(
    elements: &[Element],
    mandatory: &[Constraint],
    attributes: &[Attribute],
) -> PairMap {
    let mut pairs = PairMap::new();
    for constraint in mandatory {
        match constraint {
            Constraint::Repulsive { attribute_id, .. } => {
                let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
                    continue;
                };
                for (value, holders) in value_holders(elements, attribute_id) {
                    for (a, b) in holders.iter().tuple_combinations() {
                        pairs.insert(
                            ordered(&a.id, &b.id),
                            format!("both carry '{}' of '{}'", value, attribute.name),
                        );
                    }
                }
            }
            Constraint::Enum {
                attribute_id,
                mode: EnumMode::Exclude { .. },
            } => {
                let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
                    continue;
                };
                // Carriers of different values may never share a group.
                let carriers: Vec<(&Element, String)> = elements
                    .iter()
                    .filter_map(|e| e.grouping_key(attribute_id).map(|k| (e, k)))
                    .collect();
                for ((a, key_a), (b, key_b)) in carriers.iter().tuple_combinations() {
                    if key_a != key_b {
                        pairs.insert(
                            ordered(&a.id, &b.id),
                            format!("'{}' vs '{}' of '{}'", key_a, key_b, attribute.name),
                        );
                    }
                }
            }
            _ => {}
        }
    }
    pairs
}

fn element_name<'a>(elements: &'a [Element], id: &'a str) -> &'a str {
    elements
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.as_str())
        .unwrap_or(id)
}

/// Analytic feasibility checks that no amount of retrying can get past.
pub fn validate_mandatory_constraints(
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
    group_count: usize,
) -> CoResult<()> {
    let mandatory = mandatory_only(constraints);

    for constraint in &mandatory {
        let Some(attribute_id) = constraint.attribute_id() else {
            continue;
        };
        let Some(attribute) = metrics::find_attribute(attributes, attribute_id) else {
            continue;
        };
        match constraint {
            // Each distinct value needs its own group.
            Constraint::Enum {
                mode: EnumMode::Exclude { .. },
                ..
            } => {
                let distinct = metrics::observed_values(elements, attribute_id);
                if distinct.len() > group_count {
                    return Err(EngineError::Infeasible {
                        reason: format!(
                            "attribute '{}' has {} distinct values ({}) but only {} groups; each value needs its own group",
                            attribute.name,
                            distinct.len(),
                            distinct.join(", "),
                            group_count
                        ),
                    });
                }
            }
            // Pigeonhole: k occurrences cannot be split across fewer groups.
            Constraint::Repulsive { .. } => {
                for (value, holders) in value_holders(elements, attribute_id) {
                    if holders.len() > group_count {
                        let names = holders.iter().map(|e| e.name.as_str()).join(", ");
                        return Err(EngineError::Infeasible {
                            reason: format!(
                                "value '{}' of attribute '{}' occurs {} times ({}) and cannot be split across {} groups",
                                value,
                                attribute.name,
                                holders.len(),
                                names,
                                group_count
                            ),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    let together = together_pairs(elements, &mandatory, attributes);
    let apart = apart_pairs(elements, &mandatory, attributes);
    for (pair, together_reason) in &together {
        if let Some(apart_reason) = apart.get(pair) {
            return Err(EngineError::Infeasible {
                reason: format!(
                    "elements '{}' and '{}' must be together ({}) and apart ({}) at the same time",
                    element_name(elements, &pair.0),
                    element_name(elements, &pair.1),
                    together_reason,
                    apart_reason
                ),
            });
        }
    }
    Ok(())
}

/// Places the elements bound by mandatory constraints.
///
/// Runs up to `params.max_attempts` randomized attempts. Each attempt
/// shuffles the bound elements and, for each, accepts the first group (in
/// random order) where the hypothetical add keeps every mandatory
/// constraint satisfied. A stuck element abandons the whole attempt.
pub fn place_with_mandatory(
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
    group_count: usize,
    params: &SolverParams,
    rng: &mut Rng,
) -> CoResult<Placement> {
    let mandatory = mandatory_only(constraints);
    if mandatory.is_empty() {
        return Ok(Placement {
            groups: empty_groups(group_count),
            remaining: elements.to_vec(),
        });
    }

    validate_mandatory_constraints(elements, constraints, attributes, group_count)?;

    let bound_set = bound_ids(elements, constraints, attributes);
    let (bound, remaining): (Vec<Element>, Vec<Element>) = elements
        .iter()
        .cloned()
        .partition(|e| bound_set.contains(&e.id));

    let mut order: Vec<usize> = (0..bound.len()).collect();
    let mut slots: Vec<usize> = (0..group_count).collect();

    for attempt in 1..=params.max_attempts {
        let mut groups = empty_groups(group_count);
        rng.shuffle(&mut order);

        let mut stuck = false;
        for &index in &order {
            let element = &bound[index];
            rng.shuffle(&mut slots);

            let mut placed = false;
            for &slot in &slots {
                groups[slot].members.push(element.id.clone());
                if check_satisfaction(&groups, elements, &mandatory, attributes).satisfied {
                    placed = true;
                    break;
                }
                groups[slot].members.pop();
            }
            if !placed {
                stuck = true;
                break;
            }
        }

        if !stuck {
            debug!(attempt, bound = bound.len(), "mandatory placement settled");
            return Ok(Placement { groups, remaining });
        }
    }

    Err(EngineError::AttemptsExhausted {
        attempts: params.max_attempts,
    })
}
