//! Caller-facing composition of the engine phases.

use fastrand::Rng;
use tracing::info;
use typed_builder::TypedBuilder;

use crate::config::SolverParams;
use crate::distributor::{self, fill_unbound, improve_by_swaps, place_with_mandatory};
use crate::error::{CoResult, EngineError};
use crate::model::{Attribute, Constraint, Element, Group};
use crate::scorer::global_penalty;

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct GenerateOptions {
    /// Seeds the random source for reproducible runs.
    #[builder(default)]
    pub seed: Option<u64>,
    #[builder(default)]
    pub params: SolverParams,
}

/// Produces a fresh grouping for the given elements.
///
/// With constraints present this runs mandatory placement, greedy fill and
/// the swap search; with none it falls back to a shuffled round-robin deal.
/// Inputs are never mutated; the returned groups are new structures.
pub fn generate(
    elements: &[Element],
    group_count: usize,
    constraints: &[Constraint],
    attributes: &[Attribute],
    options: &GenerateOptions,
) -> CoResult<Vec<Group>> {
    if group_count == 0 {
        return Err(EngineError::InvalidInput {
            reason: "at least one group is required".to_string(),
        });
    }

    let mut rng = match options.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };

    if constraints.is_empty() {
        return Ok(deal_round_robin(elements, group_count, &mut rng));
    }

    let placement =
        place_with_mandatory(elements, constraints, attributes, group_count, &options.params, &mut rng)?;
    let filled = fill_unbound(
        &placement.remaining,
        elements,
        constraints,
        attributes,
        &placement.groups,
        &mut rng,
    );
    let budget = options.params.swap_budget(elements.len());
    let groups = improve_by_swaps(&filled, elements, constraints, attributes, budget, &mut rng);

    info!(
        penalty = global_penalty(&groups, elements, constraints, attributes),
        groups = group_count,
        elements = elements.len(),
        "distribution generated"
    );
    Ok(groups)
}

fn deal_round_robin(elements: &[Element], group_count: usize, rng: &mut Rng) -> Vec<Group> {
    let mut groups = distributor::empty_groups(group_count);
    let mut order: Vec<usize> = (0..elements.len()).collect();
    rng.shuffle(&mut order);
    for (slot, index) in order.into_iter().enumerate() {
        groups[slot % group_count].members.push(elements[index].id.clone());
    }
    groups
}
