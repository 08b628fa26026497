//! Constraint-based group distribution engine.
//!
//! Assigns labeled elements carrying typed attributes into a fixed number of
//! groups. Hard ("mandatory") placement rules are enforced structurally by
//! the placement solver; soft balance and affinity objectives are folded into
//! one weighted penalty scalar that the greedy fill and the swap search
//! minimize. The satisfaction checker re-validates any grouping after manual
//! edits and reports human-readable diagnostics.

pub mod api;
pub mod checker;
pub mod config;
pub mod distributor;
pub mod error;
pub mod model;
pub mod scale;
pub mod scorer;

pub use api::{generate, GenerateOptions};
pub use checker::{check_satisfaction, mandatory_only, Satisfaction};
pub use config::SolverParams;
pub use error::{CoResult, EngineError};
pub use scale::DivergenceLevel;
pub use scorer::{global_penalty, penalty_details, ConstraintPenalty};
