//! Classifier error types.

/// Errors from training, prediction, and cross-validation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Nothing to train on.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Every label has the same value.
    #[error("training labels contain only the {class} class")]
    SingleClass { class: bool },

    /// Features and labels disagree on the number of samples.
    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    /// Prediction columns differ from the columns the model was trained on.
    #[error("feature columns {found:?} do not match trained columns {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Fold count cannot partition the samples.
    #[error("cannot run {folds}-fold cross-validation: {reason}")]
    InvalidFolds { folds: usize, reason: String },

    /// Hyperparameter out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}
