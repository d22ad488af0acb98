//! The fixed, ordered feature schema.
//!
//! Pair generation, extraction, and every classifier read feature columns in
//! this order. Each descriptor names its metric and the value used when the
//! metric faults.

use persona_core::{ListField, NameField};

use crate::error::MatchError;
use crate::geo::UNKNOWN_DISTANCE_KM;

/// Which aggregate of the cross-list workplace distances a feature reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceAggregate {
    Min,
    Max,
    Mean,
}

/// The computation behind one feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Exact(NameField),
    FuzzyRatio(NameField),
    FuzzyPartial(NameField),
    Soundex(NameField),
    SharedTokens(ListField),
    WorkplaceDistance(DistanceAggregate),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureDescriptor {
    pub name: &'static str,
    pub metric: Metric,
    /// Value recorded when the metric faults.
    pub default: f64,
}

const fn feature(name: &'static str, metric: Metric) -> FeatureDescriptor {
    FeatureDescriptor {
        name,
        metric,
        default: 0.0,
    }
}

const fn distance(name: &'static str, aggregate: DistanceAggregate) -> FeatureDescriptor {
    FeatureDescriptor {
        name,
        metric: Metric::WorkplaceDistance(aggregate),
        default: UNKNOWN_DISTANCE_KM as f64,
    }
}

pub static FEATURES: [FeatureDescriptor; 22] = [
    feature("exact_first_name", Metric::Exact(NameField::First)),
    feature("exact_middle_name", Metric::Exact(NameField::Middle)),
    feature("exact_last_name", Metric::Exact(NameField::Last)),
    feature("exact_full_name", Metric::Exact(NameField::Full)),
    feature("exact_workplace", Metric::Exact(NameField::Workplace)),
    feature("fuzzy_ratio_first_name", Metric::FuzzyRatio(NameField::First)),
    feature("fuzzy_partial_first_name", Metric::FuzzyPartial(NameField::First)),
    feature("fuzzy_ratio_middle_name", Metric::FuzzyRatio(NameField::Middle)),
    feature("fuzzy_partial_middle_name", Metric::FuzzyPartial(NameField::Middle)),
    feature("fuzzy_ratio_last_name", Metric::FuzzyRatio(NameField::Last)),
    feature("fuzzy_partial_last_name", Metric::FuzzyPartial(NameField::Last)),
    feature("fuzzy_ratio_workplace", Metric::FuzzyRatio(NameField::Workplace)),
    feature("fuzzy_partial_workplace", Metric::FuzzyPartial(NameField::Workplace)),
    feature("soundex_first_name", Metric::Soundex(NameField::First)),
    feature("soundex_middle_name", Metric::Soundex(NameField::Middle)),
    feature("soundex_last_name", Metric::Soundex(NameField::Last)),
    feature("shared_focus_areas", Metric::SharedTokens(ListField::FocusAreas)),
    feature("shared_orgs", Metric::SharedTokens(ListField::Orgs)),
    feature("shared_gpes", Metric::SharedTokens(ListField::Gpes)),
    distance("workplace_distance_min", DistanceAggregate::Min),
    distance("workplace_distance_max", DistanceAggregate::Max),
    distance("workplace_distance_mean", DistanceAggregate::Mean),
];

/// Every feature name, in schema order.
#[must_use]
pub fn feature_names() -> Vec<String> {
    FEATURES.iter().map(|f| f.name.to_string()).collect()
}

#[must_use]
pub fn descriptor(name: &str) -> Option<&'static FeatureDescriptor> {
    FEATURES.iter().find(|f| f.name == name)
}

/// Resolve the configured classifier inputs against the schema.
///
/// An empty selection means the whole schema.
///
/// # Errors
///
/// Returns [`MatchError::UnknownFeature`] for a name the schema lacks.
pub fn resolve_selection(names: &[String]) -> Result<Vec<String>, MatchError> {
    if names.is_empty() {
        return Ok(feature_names());
    }
    names
        .iter()
        .map(|name| {
            descriptor(name)
                .map(|f| f.name.to_string())
                .ok_or_else(|| MatchError::UnknownFeature(name.clone()))
        })
        .collect()
}
