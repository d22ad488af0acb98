//! JSON artifacts written by `train` and `resolve`.
//!
//! Every artifact embeds the configuration that produced it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use persona_config::PersonaConfig;
use persona_core::{Diagnostics, EntityProfile};
use persona_graph::ProfileScores;
use persona_match::GenerationReport;
use persona_model::{ClassificationReport, FeatureImportance, FoldMetrics};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const MODEL_FILE: &str = "model.json";
pub const REPORT_FILE: &str = "report.json";
pub const PROFILES_FILE: &str = "profiles.json";

/// A trained classifier plus what is needed to reuse it for inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact<M> {
    pub classifier: String,
    pub created_at: DateTime<Utc>,
    pub config: PersonaConfig,
    /// Classifier input columns, in order.
    pub feature_names: Vec<String>,
    pub importances: Vec<FeatureImportance>,
    pub cross_validation: Vec<FoldMetrics>,
    pub mean_cv_f1: Option<f64>,
    pub model: M,
}

/// Held-out evaluation of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub created_at: DateTime<Utc>,
    pub config: PersonaConfig,
    pub train_persons: Vec<String>,
    pub test_persons: Vec<String>,
    pub train_pairs: GenerationReport,
    pub test_pairs: GenerationReport,
    pub classification: ClassificationReport,
    pub scores: ProfileScores,
    pub profiles: Vec<EntityProfile>,
    pub diagnostics: Diagnostics,
}

/// Profiles produced by `resolve`; scores only when ground truth was given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveReport {
    pub created_at: DateTime<Utc>,
    pub config: PersonaConfig,
    pub classifier: String,
    pub pairs: GenerationReport,
    pub classification: Option<ClassificationReport>,
    pub scores: Option<ProfileScores>,
    pub profiles: Vec<EntityProfile>,
    pub diagnostics: Diagnostics,
}

/// Pretty-print `value` to `dir/name`, creating `dir` if needed.
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(value).with_context(|| format!("failed to serialize {name}"))?;
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "artifact written");
    Ok(path)
}

pub fn read_model<M: DeserializeOwned>(path: &Path) -> anyhow::Result<ModelArtifact<M>> {
    crate::input::read_json(path).context("failed to load model artifact")
}
