//! Raw record and ground-truth files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use persona_core::record::ensure_unique_ids;
use persona_core::{ContributionRecord, GeoPoint};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// One contribution as exported upstream, before cleaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RawRecord {
    pub contribution_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    #[serde(default)]
    pub orgs: Option<Vec<String>>,
    #[serde(default)]
    pub gpes: Option<Vec<String>>,
    #[serde(default)]
    pub workplace_coordinates: Option<Vec<GeoPoint>>,
}

/// Ground-truth assignment of a contribution to a person.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GroundTruthEntry {
    #[serde(rename = "contributionId")]
    pub contribution_id: String,
    #[serde(rename = "personId")]
    pub person_id: String,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Contribution id -> person id. Later entries win on duplicates.
pub fn load_ground_truth(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let entries: Vec<GroundTruthEntry> = read_json(path)?;
    let total = entries.len();
    let truth: HashMap<String, String> = entries
        .into_iter()
        .map(|entry| (entry.contribution_id, entry.person_id))
        .collect();
    if truth.len() < total {
        tracing::warn!(
            duplicates = total - truth.len(),
            "ground truth lists some contributions more than once"
        );
    }
    Ok(truth)
}

/// Normalize raw records and attach ground truth where available.
pub fn prepare(
    raw: Vec<RawRecord>,
    truth: Option<&HashMap<String, String>>,
) -> anyhow::Result<Vec<ContributionRecord>> {
    let mut records: Vec<ContributionRecord> = raw.into_iter().map(normalize).collect();
    if let Some(truth) = truth {
        for record in &mut records {
            record.person_id = truth.get(&record.id).cloned();
        }
        let unknown = records.iter().filter(|r| r.person_id.is_none()).count();
        if unknown > 0 {
            tracing::warn!(records = unknown, "records without ground truth");
        }
    }
    ensure_unique_ids(&records).context("contribution ids must be unique")?;
    Ok(records)
}

/// Read, normalize, and label the records a command works on.
pub fn load_records(
    records: &Path,
    ground_truth: Option<&Path>,
) -> anyhow::Result<Vec<ContributionRecord>> {
    let raw: Vec<RawRecord> = read_json(records)?;
    let truth = ground_truth.map(load_ground_truth).transpose()?;
    let records = prepare(raw, truth.as_ref())?;
    tracing::info!(records = records.len(), labeled = truth.is_some(), "records loaded");
    Ok(records)
}

/// Record id -> person id for every labeled record.
#[must_use]
pub fn truth_map(records: &[ContributionRecord]) -> HashMap<String, String> {
    records
        .iter()
        .filter_map(|r| r.person_id.clone().map(|person| (r.id.clone(), person)))
        .collect()
}
