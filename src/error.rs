// src/error.rs
// Error types for the trip planner client

use thiserror::Error;

/// Main error type for the trip planner library
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Network failure, timeout, bad status or unparsable reply
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// Backend answered but flagged the exchange as failed
    #[error("backend reported an error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using PlannerError
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether the orchestrator should answer from the simulator instead
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TransportUnavailable(_) | Self::Backend(_))
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlannerError::TransportUnavailable(format!("request timed out: {}", err))
        } else {
            PlannerError::TransportUnavailable(err.to_string())
        }
    }
}
