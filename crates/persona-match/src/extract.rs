//! Feature vector computation for one ordered record pair.

use persona_core::{ContributionRecord, NameField};

use crate::error::FeatureFault;
use crate::geo::{DistanceSummary, workplace_distances};
use crate::schema::{DistanceAggregate, FEATURES, FeatureDescriptor, Metric};
use crate::similarity::{
    exact_match, fuzzy_partial_ratio, fuzzy_ratio, shared_tokens, soundex_match,
};

/// Feature values for one pair plus the names of every defaulted feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub values: Vec<f64>,
    pub defaulted: Vec<&'static str>,
}

/// Computes the schema's feature vector. Stateless; safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    schema: &'static [FeatureDescriptor],
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self { schema: &FEATURES }
    }
}

impl FeatureExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.schema.iter().map(|f| f.name.to_string()).collect()
    }

    #[must_use]
    pub fn extract(&self, a: &ContributionRecord, b: &ContributionRecord) -> Extraction {
        let mut values = Vec::with_capacity(self.schema.len());
        let mut defaulted = Vec::new();
        // Shared by the three distance aggregates.
        let mut distances: Option<Result<DistanceSummary, FeatureFault>> = None;

        for descriptor in self.schema {
            let outcome = match descriptor.metric {
                Metric::Exact(field) => exact_match(a.name(field), b.name(field)),
                Metric::FuzzyRatio(field) => {
                    present(a, b, field).and_then(|(x, y)| fuzzy_ratio(x, y).map(f64::from))
                }
                Metric::FuzzyPartial(field) => present(a, b, field)
                    .and_then(|(x, y)| fuzzy_partial_ratio(x, y).map(f64::from)),
                Metric::Soundex(field) => soundex_match(a.name(field), b.name(field)),
                Metric::SharedTokens(field) => {
                    Ok(count_to_f64(shared_tokens(a.tokens(field), b.tokens(field))))
                }
                Metric::WorkplaceDistance(aggregate) => (*distances.get_or_insert_with(|| {
                    workplace_distances(&a.workplace_coordinates, &b.workplace_coordinates)
                }))
                .map(|summary| match aggregate {
                    DistanceAggregate::Min => f64::from(summary.min),
                    DistanceAggregate::Max => f64::from(summary.max),
                    DistanceAggregate::Mean => summary.mean,
                }),
            };

            match outcome {
                Ok(value) => values.push(value),
                Err(fault) => {
                    tracing::trace!(
                        feature = descriptor.name,
                        left = %a.id,
                        right = %b.id,
                        %fault,
                        "feature defaulted"
                    );
                    values.push(descriptor.default);
                    defaulted.push(descriptor.name);
                }
            }
        }

        Extraction { values, defaulted }
    }
}

fn present<'r>(
    a: &'r ContributionRecord,
    b: &'r ContributionRecord,
    field: NameField,
) -> Result<(&'r str, &'r str), FeatureFault> {
    match (a.name(field), b.name(field)) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(FeatureFault::EmptyField),
    }
}

#[allow(clippy::cast_precision_loss)]
const fn count_to_f64(count: usize) -> f64 {
    count as f64
}
