use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// A single attributable contribution after normalization.
///
/// Scalar names are lower-cased, punctuation-stripped and whitespace-collapsed;
/// list fields hold cleaned tokens. Records are never mutated once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContributionRecord {
    pub id: String,
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
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub orgs: Vec<String>,
    #[serde(default)]
    pub gpes: Vec<String>,
    #[serde(default)]
    pub workplace_coordinates: Vec<GeoPoint>,
    /// Ground-truth person id. `None` when unknown.
    #[serde(default)]
    pub person_id: Option<String>,
}

impl ContributionRecord {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_person(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, field: NameField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            NameField::First => self.first_name = value,
            NameField::Middle => self.middle_name = value,
            NameField::Last => self.last_name = value,
            NameField::Full => self.full_name = value,
            NameField::Workplace => self.workplace = value,
        }
        self
    }

    #[must_use]
    pub fn with_tokens<I, S>(mut self, field: ListField, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens.into_iter().map(Into::into).collect();
        match field {
            ListField::FocusAreas => self.focus_areas = tokens,
            ListField::Orgs => self.orgs = tokens,
            ListField::Gpes => self.gpes = tokens,
        }
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, points: impl IntoIterator<Item = GeoPoint>) -> Self {
        self.workplace_coordinates = points.into_iter().collect();
        self
    }

    #[must_use]
    pub fn name(&self, field: NameField) -> Option<&str> {
        match field {
            NameField::First => self.first_name.as_deref(),
            NameField::Middle => self.middle_name.as_deref(),
            NameField::Last => self.last_name.as_deref(),
            NameField::Full => self.full_name.as_deref(),
            NameField::Workplace => self.workplace.as_deref(),
        }
    }

    #[must_use]
    pub fn tokens(&self, field: ListField) -> &[String] {
        match field {
            ListField::FocusAreas => &self.focus_areas,
            ListField::Orgs => &self.orgs,
            ListField::Gpes => &self.gpes,
        }
    }

    /// Whether two records share a person.
    ///
    /// `None` when either ground truth is unknown: such a pair cannot carry a label.
    #[must_use]
    pub fn same_person(&self, other: &Self) -> Option<bool> {
        match (&self.person_id, &other.person_id) {
            (Some(a), Some(b)) => Some(a == b),
            _ => None,
        }
    }
}

/// Scalar name fields compared by the feature extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    First,
    Middle,
    Last,
    Full,
    Workplace,
}

/// Tokenized list fields compared by shared-token count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListField {
    FocusAreas,
    Orgs,
    Gpes,
}

/// Reject batches where two records share an id.
///
/// # Errors
///
/// Returns [`CoreError::DuplicateRecord`] naming the first repeated id.
pub fn ensure_unique_ids(records: &[ContributionRecord]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(CoreError::DuplicateRecord {
                record_id: record.id.clone(),
            });
        }
    }
    Ok(())
}
