//! # persona-config
//!
//! Layered configuration loading for persona using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PERSONA_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.persona/config.toml`
//! 4. User-level `~/.config/persona/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PERSONA_SAMPLING__NEGATIVE_RATE` -> `sampling.negative_rate`,
//! `PERSONA_DATA__RECORDS` -> `data.records`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use persona_config::PersonaConfig;
//!
//! let config = PersonaConfig::load(None).expect("config");
//! config.validate().expect("valid config");
//! println!("keeping every {}th negative", config.sampling.negative_rate);
//! ```

mod classifier;
mod data;
mod error;
mod features;
mod sampling;

pub use classifier::ClassifierConfig;
pub use data::{DataConfig, OutputConfig};
pub use error::ConfigError;
pub use features::FeaturesConfig;
pub use sampling::{SamplingConfig, SamplingStrategy, SplitConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PersonaConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl PersonaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env`; the binary loads it before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse or extract.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".persona/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("PERSONA_").split("__"))
    }

    /// Check every section. Run before any stage starts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sampling.validate()?;
        self.split.validate()?;
        self.classifier.validate()?;
        self.features.validate()?;
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("persona").join("config.toml"))
    }
}
