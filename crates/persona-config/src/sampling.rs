//! Negative sampling and train/test split settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Keep every 6th different-person pair.
const fn default_negative_rate() -> usize {
    6
}

const fn default_train_ratio() -> f64 {
    0.7
}

/// How retained negatives are chosen.
///
/// Mirrors `persona_match::SamplingStrategy` variant for variant; the binary
/// maps one onto the other.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// One counter over negatives in row-major order.
    #[default]
    Sequential,
    /// Decision derived from the pair's row indices; parallel enumeration.
    Positional,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Retain every n-th negative pair (`n >= 1`).
    #[serde(default = "default_negative_rate")]
    pub negative_rate: usize,

    #[serde(default)]
    pub strategy: SamplingStrategy,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            negative_rate: default_negative_rate(),
            strategy: SamplingStrategy::default(),
        }
    }
}

impl SamplingConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the rate is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.negative_rate == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sampling.negative_rate".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SplitConfig {
    /// Fraction of persons assigned to training.
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,

    /// Seed for the person shuffle.
    #[serde(default)]
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_ratio: default_train_ratio(),
            seed: 0,
        }
    }
}

impl SplitConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless `0 < train_ratio < 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "split.train_ratio".into(),
                reason: format!("{} is outside (0, 1)", self.train_ratio),
            });
        }
        Ok(())
    }
}
