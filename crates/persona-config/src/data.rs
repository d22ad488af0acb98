//! Input and output locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DataConfig {
    /// JSON array of raw contribution records.
    #[serde(default)]
    pub records: Option<PathBuf>,

    /// JSON list of `{ contributionId, personId }` rows.
    #[serde(default)]
    pub ground_truth: Option<PathBuf>,
}

impl DataConfig {
    /// Path to the records file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when `data.records` is unset.
    pub fn require_records(&self) -> Result<&Path, ConfigError> {
        self.records.as_deref().ok_or_else(|| ConfigError::MissingKey {
            key: "data.records".into(),
        })
    }

    /// Path to the ground-truth file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when `data.ground_truth` is unset.
    pub fn require_ground_truth(&self) -> Result<&Path, ConfigError> {
        self.ground_truth
            .as_deref()
            .ok_or_else(|| ConfigError::MissingKey {
                key: "data.ground_truth".into(),
            })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving `model.json`, `report.json` and `profiles.json`.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_paths_name_their_key() {
        let config = DataConfig::default();
        let err = config.require_records().unwrap_err();
        assert_eq!(err.to_string(), "Configuration key 'data.records' is required but not set");
        assert!(matches!(
            config.require_ground_truth(),
            Err(ConfigError::MissingKey { key }) if key == "data.ground_truth"
        ));
    }

    #[test]
    fn output_defaults_to_results() {
        assert_eq!(OutputConfig::default().dir, PathBuf::from("results"));
    }
}
