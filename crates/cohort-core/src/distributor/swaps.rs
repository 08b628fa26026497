use std::collections::HashSet;

use fastrand::Rng;
use tracing::debug;

use crate::checker::{check_satisfaction, mandatory_only};
use crate::model::{Attribute, Constraint, Element, Group};
use crate::scorer::global_penalty;

use super::bound_ids;

/// Hill-climbing pass over pairwise swaps of freely movable elements.
///
/// Elements touched by a mandatory constraint stay where the solver put
/// them. A swap is kept only when it leaves every mandatory constraint
/// satisfied and yields a strictly lower global penalty, so the penalty is
/// monotonically non-increasing across the run.
pub fn improve_by_swaps(
    groups: &[Group],
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
    num_swaps: usize,
    rng: &mut Rng,
) -> Vec<Group> {
    let mandatory = mandatory_only(constraints);
    let immobile: HashSet<String> = bound_ids(elements, constraints, attributes);

    let mut result = groups.to_vec();
    let mut current = global_penalty(&result, elements, constraints, attributes);
    let mut accepted = 0usize;

    for _ in 0..num_swaps {
        let slots: Vec<(usize, usize)> = result
            .iter()
            .enumerate()
            .flat_map(|(g, group)| {
                group
                    .members
                    .iter()
                    .enumerate()
                    .filter(|(_, id)| !immobile.contains(*id))
                    .map(|(position, _)| (g, position))
                    .collect::<Vec<_>>()
            })
            .collect();
        if slots.len() < 2 {
            break;
        }

        let first = slots[rng.usize(0..slots.len())];
        let second = slots[rng.usize(0..slots.len())];
        if first == second || first.0 == second.0 {
            continue;
        }

        let id_a = result[first.0].members[first.1].clone();
        let id_b = result[second.0].members[second.1].clone();
        result[first.0].members[first.1] = id_b.clone();
        result[second.0].members[second.1] = id_a.clone();

        let keeps_mandatory = mandatory.is_empty()
            || check_satisfaction(&result, elements, &mandatory, attributes).satisfied;
        let candidate = if keeps_mandatory {
            global_penalty(&result, elements, constraints, attributes)
        } else {
            f64::INFINITY
        };

        if keeps_mandatory && candidate < current {
            current = candidate;
            accepted += 1;
        } else {
            result[first.0].members[first.1] = id_a;
            result[second.0].members[second.1] = id_b;
        }
    }

    debug!(accepted, penalty = current, "swap search finished");
    result
}
