use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The constraint set cannot be satisfied for the requested group count.
    /// Detected analytically before placement; retrying cannot help.
    #[error("Infeasible constraints: {reason}")]
    Infeasible { reason: String },

    /// The randomized placement loop ran out of attempts without finding a
    /// valid assignment. The constraints passed the analytic checks, so a
    /// retry with fresh randomness may succeed.
    #[error("No valid placement found after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl EngineError {
    pub fn retryable(&self) -> bool {
        matches!(self, EngineError::AttemptsExhausted { .. })
    }
}

pub type CoResult<T> = Result<T, EngineError>;
