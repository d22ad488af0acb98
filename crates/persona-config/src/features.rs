//! Feature selection for the classifier.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct FeaturesConfig {
    /// Ordered feature names fed to the classifier. Empty selects the full schema.
    #[serde(default)]
    pub names: Vec<String>,
}

impl FeaturesConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for blank or repeated names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, name) in self.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "features.names".into(),
                    reason: format!("entry {index} is blank"),
                });
            }
            if self.names[..index].contains(name) {
                return Err(ConfigError::InvalidValue {
                    field: "features.names".into(),
                    reason: format!("'{name}' is listed twice"),
                });
            }
        }
        Ok(())
    }
}
