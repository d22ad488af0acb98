//! Classifier hyperparameters.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_depth() -> usize {
    10
}

const fn default_n_estimators() -> usize {
    100
}

const fn default_n_folds() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClassifierConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    /// Cross-validation fold count.
    #[serde(default = "default_n_folds")]
    pub n_folds: usize,

    #[serde(default)]
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            n_estimators: default_n_estimators(),
            n_folds: default_n_folds(),
            seed: 0,
        }
    }
}

impl ClassifierConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero depth or estimator
    /// count, or fewer than two folds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(invalid("classifier.max_depth", "must be at least 1"));
        }
        if self.n_estimators == 0 {
            return Err(invalid("classifier.n_estimators", "must be at least 1"));
        }
        if self.n_folds < 2 {
            return Err(invalid("classifier.n_folds", "must be at least 2"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}
