//! Cross-cutting error types for persona.
//!
//! Stage-specific errors (`MatchError`, `ModelError`, `GraphError`) live in
//! their own crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any persona crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record used in a label-bearing pair has no known person id.
    #[error("Missing ground truth for record {record_id}")]
    MissingGroundTruth { record_id: String },

    /// Two records in one batch share an identifier.
    #[error("Duplicate record id: {record_id}")]
    DuplicateRecord { record_id: String },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
