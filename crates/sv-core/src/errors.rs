//! Cross-cutting error types for stackview.
//!
//! Transport and configuration errors live in their own crates
//! (`ClientError`, `ConfigError`). They converge into `anyhow` in `sv-cli`.

use thiserror::Error;

/// Errors that can be raised by core view logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A page state transition was attempted that is not allowed.
    #[error("Invalid state transition: {page} from {from} to {to}")]
    InvalidTransition {
        page: String,
        from: String,
        to: String,
    },

    /// Data failed validation (blank input, id mismatch, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn transition(page: &str, from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            page: page.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
