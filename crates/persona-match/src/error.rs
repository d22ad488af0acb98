//! Error types for pair generation and feature extraction.

use persona_core::CoreError;

/// Recoverable per-pair, per-feature failures. The feature takes its
/// schema default and the fault is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FeatureFault {
    /// One side has no value (absent string, empty string, empty list).
    #[error("empty field")]
    EmptyField,

    /// A value produced no phonetic code.
    #[error("malformed phonetic input")]
    MalformedPhoneticInput,
}

/// Errors from pair generation and feature selection.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A requested feature is not part of the schema.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// Negative sampling rate must be at least 1.
    #[error("invalid negative sampling rate: {0}")]
    InvalidSamplingRate(usize),

    /// Error from record validation.
    #[error(transparent)]
    Core(#[from] CoreError),
}
