//! Error types for the fallible entry points.
//!
//! Scheduling and conflict detection themselves are total; only config
//! loading and checked planning can fail.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by config loading and checked planning.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Config JSON could not be parsed.
    #[error("invalid project config: {0}")]
    Config(#[from] serde_json::Error),
    /// Input failed validation.
    #[error("invalid plan input ({} problem(s)): {}", .0.len(), summarize(.0))]
    Invalid(Vec<ValidationError>),
}

impl From<Vec<ValidationError>> for PlanError {
    fn from(errors: Vec<ValidationError>) -> Self {
        PlanError::Invalid(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
