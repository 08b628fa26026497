use clap::Args;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

use cohort_core::api::{generate, GenerateOptions};
use cohort_core::checker::check_satisfaction;
use cohort_core::config::SolverParams;
use cohort_core::model::{validate_constraints, Distribution};
use cohort_core::scorer::penalty_details;

use crate::project::ProjectFile;
use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Project file with attributes, elements and constraints.
    #[arg(short, long)]
    pub input: String,

    /// Number of groups to distribute into.
    #[arg(short, long)]
    pub groups: usize,

    /// Seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the distribution snapshot.
    #[arg(short, long)]
    pub out: Option<String>,

    #[command(flatten)]
    pub params: SolverParams,
}

pub fn run(args: GenerateArgs) -> i32 {
    let project = match ProjectFile::load_from_file(&args.input) {
        Ok(project) => project,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    info!(
        "📂 Loaded '{}': {} elements, {} constraints",
        project.name,
        project.elements.len(),
        project.constraints.len()
    );
    for problem in validate_constraints(&project.constraints, &project.attributes) {
        warn!("⚠️  {}", problem);
    }

    let options = GenerateOptions {
        seed: args.seed,
        params: args.params.clone(),
    };
    let groups = match generate(
        &project.elements,
        args.groups,
        &project.constraints,
        &project.attributes,
        &options,
    ) {
        Ok(groups) => groups,
        Err(e) => {
            error!("{}", e);
            return if e.retryable() {
                info!("The constraints look satisfiable; run again for a fresh attempt.");
                3
            } else {
                2
            };
        }
    };

    reports::print_roster(&groups, &project.elements);
    reports::print_penalties(&penalty_details(
        &groups,
        &project.elements,
        &project.constraints,
        &project.attributes,
    ));
    let satisfaction = check_satisfaction(
        &groups,
        &project.elements,
        &project.constraints,
        &project.attributes,
    );
    reports::print_issues(&satisfaction);

    if let Some(out) = &args.out {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let distribution = Distribution::snapshot(
            &format!("dist-{}", created_at),
            &project.name,
            created_at,
            &project.constraints,
            &groups,
            &project.elements,
            &project.attributes,
        );
        let json = match serde_json::to_string_pretty(&distribution) {
            Ok(json) => json,
            Err(e) => {
                error!("{}", e);
                return 1;
            }
        };
        if let Err(e) = std::fs::write(out, json) {
            error!("cannot write '{}': {}", out, e);
            return 1;
        }
        info!("💾 Snapshot written to {}", out);
    }

    0
}
