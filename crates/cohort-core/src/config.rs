use clap::Args;
use serde::{Deserialize, Serialize};

/// Knobs for the randomized placement and swap phases.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SolverParams {
    /// Retries for the mandatory placement loop before giving up.
    #[arg(long, default_value_t = 100)]
    pub max_attempts: usize,

    /// Hard ceiling on swap iterations regardless of element count.
    #[arg(long, default_value_t = 1000)]
    pub swap_cap: usize,

    /// Swap iterations granted per element.
    #[arg(long, default_value_t = 10)]
    pub swaps_per_element: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            swap_cap: 1000,
            swaps_per_element: 10,
        }
    }
}

impl SolverParams {
    pub fn swap_budget(&self, element_count: usize) -> usize {
        self.swap_cap.min(element_count * self.swaps_per_element)
    }
}
