//! Engine error types.
//!
//! Every entry point reports failures synchronously through [`EngineError`].
//! Nothing is retried internally: a failed invocation leaves no state behind,
//! so the next call starts clean.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure kinds surfaced to the caller.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required input collection was empty.
    #[error("missing data: no {collection} supplied")]
    MissingData { collection: &'static str },

    /// A referenced entity is absent from the supplied input.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Required units could not be placed within the available slots.
    #[error("infeasible: {reason} ({unplaced} unplaced)")]
    Infeasible { reason: String, unplaced: usize },

    /// A parameter is out of range or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Structural input checks failed.
    #[error("input validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn missing(collection: &'static str) -> Self {
        Self::MissingData { collection }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
