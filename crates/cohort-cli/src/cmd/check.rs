use clap::Args;
use tracing::error;

use cohort_core::checker::check_satisfaction;
use cohort_core::model::Distribution;
use cohort_core::scorer::penalty_details;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Distribution snapshot to re-validate.
    #[arg(short, long)]
    pub input: String,
}

/// Re-runs the satisfaction checker against a stored snapshot, e.g. after
/// elements were moved between groups by hand. Violations are advisory:
/// they are printed, never enforced.
pub fn run(args: CheckArgs) -> i32 {
    let raw = match std::fs::read_to_string(&args.input) {
        Ok(raw) => raw,
        Err(e) => {
            error!("cannot read '{}': {}", args.input, e);
            return 1;
        }
    };
    let distribution: Distribution = match serde_json::from_str(&raw) {
        Ok(distribution) => distribution,
        Err(e) => {
            error!("cannot parse '{}': {}", args.input, e);
            return 1;
        }
    };

    println!("\n🔎 === DISTRIBUTION CHECK: {} === 🔎", distribution.name);
    reports::print_roster(&distribution.groups, &distribution.elements);
    reports::print_penalties(&penalty_details(
        &distribution.groups,
        &distribution.elements,
        &distribution.constraints,
        &distribution.attributes,
    ));
    let satisfaction = check_satisfaction(
        &distribution.groups,
        &distribution.elements,
        &distribution.constraints,
        &distribution.attributes,
    );
    reports::print_issues(&satisfaction);

    0
}
