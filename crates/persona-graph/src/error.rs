//! Graph construction errors.

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Each candidate pair needs exactly one verdict.
    #[error("{pairs} candidate pairs but {verdicts} verdicts")]
    LengthMismatch { pairs: usize, verdicts: usize },
}
