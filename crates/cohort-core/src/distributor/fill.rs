use fastrand::Rng;
use tracing::debug;

use crate::model::{Attribute, Constraint, Element, Group};
use crate::scorer::global_penalty;

/// Places the elements left over by the mandatory phase, one at a time in
/// random order, each into whichever group yields the lowest hypothetical
/// global penalty. Ties resolve to the earliest-scanned group.
pub fn fill_unbound(
    remaining: &[Element],
    elements: &[Element],
    constraints: &[Constraint],
    attributes: &[Attribute],
    groups: &[Group],
    rng: &mut Rng,
) -> Vec<Group> {
    let mut result = groups.to_vec();
    if result.is_empty() {
        return result;
    }

    let mut order: Vec<usize> = (0..remaining.len()).collect();
    rng.shuffle(&mut order);

    for index in order {
        let element = &remaining[index];
        let mut best_group = 0;
        let mut best_penalty = f64::INFINITY;
        for g in 0..result.len() {
            result[g].members.push(element.id.clone());
            let penalty = global_penalty(&result, elements, constraints, attributes);
            result[g].members.pop();
            if penalty < best_penalty {
                best_penalty = penalty;
                best_group = g;
            }
        }
        result[best_group].members.push(element.id.clone());
    }

    debug!(placed = remaining.len(), "greedy fill finished");
    result
}
