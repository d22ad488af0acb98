//! Candidate pair enumeration with deterministic negative subsampling.
//!
//! Every unordered pair `(i, j)` with `i < j` is examined in row-major
//! order. Same-person pairs are always kept; different-person pairs are thinned
//! to every n-th so training tables stay balanced and reproducible.
//!
//! Enumeration is O(N²). Callers bound N by blocking upstream; nothing here
//! prunes the candidate space.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use persona_core::record::ensure_unique_ids;
use persona_core::{CandidatePair, ContributionRecord, CoreError, FeatureMatrix};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::extract::FeatureExtractor;

/// What the generated table is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMode {
    /// Label-bearing: pairs without ground truth on both sides are dropped,
    /// negatives are subsampled.
    #[default]
    Training,
    /// Every pair is kept; labels are filled where ground truth allows.
    Inference,
}

/// How retained negatives are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// Keep the negative whose 1-based running count is a multiple of `n`.
    /// The scan is serial; feature computation is parallel.
    #[default]
    Sequential,
    /// Keep the negative when a hash of `(i, j)` is a multiple of `n`.
    /// No shared counter, so the scan itself runs in parallel.
    Positional,
}

/// Counts describing one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub records: usize,
    pub examined: usize,
    pub positives: usize,
    pub negatives_examined: usize,
    pub negatives_retained: usize,
    /// Pairs with unknown ground truth kept in inference mode.
    pub unlabeled: usize,
    /// Pairs with unknown ground truth dropped in training mode.
    pub dropped_missing_truth: usize,
    /// Feature name -> pairs where the default was used.
    pub defaulted: BTreeMap<String, usize>,
}

impl GenerationReport {
    fn absorb(&mut self, other: &Self) {
        self.examined += other.examined;
        self.positives += other.positives;
        self.negatives_examined += other.negatives_examined;
        self.negatives_retained += other.negatives_retained;
        self.unlabeled += other.unlabeled;
        self.dropped_missing_truth += other.dropped_missing_truth;
    }
}

/// Generated pairs with their feature vectors, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairTable {
    pub feature_names: Vec<String>,
    pub pairs: Vec<CandidatePair>,
    pub report: GenerationReport,
}

impl PairTable {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All feature columns.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if a pair's vector width is off-schema.
    pub fn matrix(&self) -> Result<FeatureMatrix, CoreError> {
        FeatureMatrix::new(
            self.feature_names.clone(),
            self.pairs.iter().map(|p| p.features.clone()).collect(),
        )
    }

    /// Labels for a label-bearing table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingGroundTruth`] for the first unlabeled pair.
    pub fn labels(&self) -> Result<Vec<bool>, CoreError> {
        self.pairs
            .iter()
            .map(|pair| {
                pair.same_person.ok_or_else(|| CoreError::MissingGroundTruth {
                    record_id: format!("{} / {}", pair.left_id, pair.right_id),
                })
            })
            .collect()
    }

    /// Indices and labels of the pairs whose label is known.
    #[must_use]
    pub fn known_labels(&self) -> (Vec<usize>, Vec<bool>) {
        self.pairs
            .iter()
            .enumerate()
            .filter_map(|(index, pair)| pair.same_person.map(|label| (index, label)))
            .unzip()
    }
}

/// A pair chosen for feature computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selected {
    left: usize,
    right: usize,
    label: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct PairGenerator {
    rate: NonZeroUsize,
    strategy: SamplingStrategy,
    mode: PairMode,
    extractor: FeatureExtractor,
}

impl PairGenerator {
    /// Generator keeping every `rate`-th negative.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidSamplingRate`] when `rate` is zero.
    pub fn new(rate: usize) -> Result<Self, MatchError> {
        let rate = NonZeroUsize::new(rate).ok_or(MatchError::InvalidSamplingRate(rate))?;
        Ok(Self {
            rate,
            strategy: SamplingStrategy::default(),
            mode: PairMode::default(),
            extractor: FeatureExtractor::new(),
        })
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: PairMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enumerate, sample, and featurize.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Core`] when two records share an id.
    pub fn generate(&self, records: &[ContributionRecord]) -> Result<PairTable, MatchError> {
        ensure_unique_ids(records)?;

        let (selected, mut report) = match (self.mode, self.strategy) {
            (PairMode::Inference, _) => select_all(records),
            (PairMode::Training, SamplingStrategy::Sequential) => {
                select_sequential(records, self.rate.get())
            }
            (PairMode::Training, SamplingStrategy::Positional) => {
                select_positional(records, self.rate.get())
            }
        };
        report.records = records.len();

        if report.dropped_missing_truth > 0 {
            tracing::warn!(
                dropped = report.dropped_missing_truth,
                "dropped pairs with unknown ground truth from label-bearing table"
            );
        }

        let extractions: Vec<_> = selected
            .par_iter()
            .map(|s| self.extractor.extract(&records[s.left], &records[s.right]))
            .collect();

        let mut pairs = Vec::with_capacity(selected.len());
        for (s, extraction) in selected.iter().zip(extractions) {
            for name in &extraction.defaulted {
                *report.defaulted.entry((*name).to_string()).or_default() += 1;
            }
            pairs.push(CandidatePair {
                left: s.left,
                right: s.right,
                left_id: records[s.left].id.clone(),
                right_id: records[s.right].id.clone(),
                features: extraction.values,
                same_person: s.label,
            });
        }

        tracing::debug!(
            records = report.records,
            examined = report.examined,
            positives = report.positives,
            negatives_retained = report.negatives_retained,
            pairs = pairs.len(),
            "generated candidate pairs"
        );

        Ok(PairTable {
            feature_names: self.extractor.names(),
            pairs,
            report,
        })
    }
}

fn select_all(records: &[ContributionRecord]) -> (Vec<Selected>, GenerationReport) {
    let mut report = GenerationReport::default();
    let mut selected = Vec::new();
    for (i, left) in records.iter().enumerate() {
        for (j, right) in records.iter().enumerate().skip(i + 1) {
            let label = left.same_person(right);
            report.examined += 1;
            match label {
                Some(true) => report.positives += 1,
                Some(false) => {
                    report.negatives_examined += 1;
                    report.negatives_retained += 1;
                }
                None => report.unlabeled += 1,
            }
            selected.push(Selected {
                left: i,
                right: j,
                label,
            });
        }
    }
    (selected, report)
}

fn select_sequential(
    records: &[ContributionRecord],
    rate: usize,
) -> (Vec<Selected>, GenerationReport) {
    let mut report = GenerationReport::default();
    let mut selected = Vec::new();
    let mut negatives_seen = 0usize;

    for (i, left) in records.iter().enumerate() {
        for (j, right) in records.iter().enumerate().skip(i + 1) {
            report.examined += 1;
            match left.same_person(right) {
                Some(true) => {
                    report.positives += 1;
                    selected.push(Selected {
                        left: i,
                        right: j,
                        label: Some(true),
                    });
                }
                Some(false) => {
                    negatives_seen += 1;
                    report.negatives_examined += 1;
                    if negatives_seen % rate == 0 {
                        report.negatives_retained += 1;
                        selected.push(Selected {
                            left: i,
                            right: j,
                            label: Some(false),
                        });
                    }
                }
                None => {
                    report.dropped_missing_truth += 1;
                    tracing::trace!(left = %left.id, right = %right.id, "missing ground truth");
                }
            }
        }
    }
    (selected, report)
}

fn select_positional(
    records: &[ContributionRecord],
    rate: usize,
) -> (Vec<Selected>, GenerationReport) {
    let rows: Vec<(Vec<Selected>, GenerationReport)> = (0..records.len())
        .into_par_iter()
        .map(|i| {
            let left = &records[i];
            let mut report = GenerationReport::default();
            let mut selected = Vec::new();
            for (j, right) in records.iter().enumerate().skip(i + 1) {
                report.examined += 1;
                match left.same_person(right) {
                    Some(true) => {
                        report.positives += 1;
                        selected.push(Selected {
                            left: i,
                            right: j,
                            label: Some(true),
                        });
                    }
                    Some(false) => {
                        report.negatives_examined += 1;
                        if retain_positional(i, j, rate) {
                            report.negatives_retained += 1;
                            selected.push(Selected {
                                left: i,
                                right: j,
                                label: Some(false),
                            });
                        }
                    }
                    None => report.dropped_missing_truth += 1,
                }
            }
            (selected, report)
        })
        .collect();

    let mut report = GenerationReport::default();
    let mut selected = Vec::new();
    for (row, row_report) in rows {
        selected.extend(row);
        report.absorb(&row_report);
    }
    (selected, report)
}

/// Retention decision derived only from the pair's row indices.
fn retain_positional(i: usize, j: usize, rate: usize) -> bool {
    let position = ((i as u64) << 32) ^ (j as u64);
    splitmix64(position) % (rate as u64) == 0
}

const fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn people(ids: &[Option<&str>]) -> Vec<ContributionRecord> {
        ids.iter()
            .enumerate()
            .map(|(index, person)| {
                let record = ContributionRecord::new(format!("r{}", index + 1));
                match person {
                    Some(person) => record.with_person(*person),
                    None => record,
                }
            })
            .collect()
    }

    fn ids(table: &PairTable) -> Vec<(String, String)> {
        table
            .pairs
            .iter()
            .map(|p| (p.left_id.clone(), p.right_id.clone()))
            .collect()
    }

    #[test]
    fn zero_rate_is_rejected() {
        assert!(matches!(
            PairGenerator::new(0),
            Err(MatchError::InvalidSamplingRate(0))
        ));
    }

    #[test]
    fn rate_one_keeps_every_pair() {
        let records = people(&[Some("A"), Some("A"), Some("B")]);
        let table = PairGenerator::new(1).unwrap().generate(&records).unwrap();

        assert_eq!(
            ids(&table),
            vec![
                ("r1".into(), "r2".into()),
                ("r1".into(), "r3".into()),
                ("r2".into(), "r3".into()),
            ]
        );
        assert_eq!(table.labels().unwrap(), vec![true, false, false]);
        assert_eq!(table.report.positives, 1);
        assert_eq!(table.report.negatives_retained, 2);
    }

    #[test]
    fn sequential_counter_keeps_every_nth_negative() {
        // r1 is A, r2..r5 are B..E: r1's row holds four negatives, then six more.
        let records = people(&[Some("A"), Some("B"), Some("C"), Some("D"), Some("E")]);
        let table = PairGenerator::new(3).unwrap().generate(&records).unwrap();

        assert_eq!(table.report.negatives_examined, 10);
        assert_eq!(table.report.negatives_retained, 3);
        // Negatives in order: (1,2) (1,3) (1,4) (1,5) (2,3) (2,4) (2,5) (3,4) (3,5) (4,5)
        assert_eq!(
            ids(&table),
            vec![
                ("r1".into(), "r4".into()),
                ("r2".into(), "r4".into()),
                ("r3".into(), "r5".into()),
            ]
        );
    }

    #[test]
    fn counter_advances_past_positives_unchanged() {
        let records = people(&[Some("A"), Some("A"), Some("B"), Some("C")]);
        let table = PairGenerator::new(2).unwrap().generate(&records).unwrap();

        // (1,2) positive; negatives (1,3) (1,4) (2,3) (2,4) (3,4) -> keep 2nd and 4th.
        assert_eq!(
            ids(&table),
            vec![
                ("r1".into(), "r2".into()),
                ("r1".into(), "r4".into()),
                ("r2".into(), "r4".into()),
            ]
        );
    }

    #[test]
    fn training_drops_pairs_without_ground_truth() {
        let records = people(&[Some("A"), None, Some("A")]);
        let table = PairGenerator::new(1).unwrap().generate(&records).unwrap();

        assert_eq!(ids(&table), vec![("r1".into(), "r3".into())]);
        assert_eq!(table.report.dropped_missing_truth, 2);
        assert!(table.labels().is_ok());
    }

    #[test]
    fn inference_keeps_unlabeled_pairs() {
        let records = people(&[Some("A"), None, Some("A")]);
        let table = PairGenerator::new(5)
            .unwrap()
            .with_mode(PairMode::Inference)
            .generate(&records)
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.report.unlabeled, 2);
        assert!(table.labels().is_err());
        assert_eq!(table.known_labels(), (vec![1], vec![true]));
    }

    #[test]
    fn positional_strategy_matches_its_own_rule() {
        let records = people(&[Some("A"), Some("B"), Some("C"), Some("D"), Some("A")]);
        let table = PairGenerator::new(2)
            .unwrap()
            .with_strategy(SamplingStrategy::Positional)
            .generate(&records)
            .unwrap();

        for pair in &table.pairs {
            if pair.same_person == Some(false) {
                assert!(retain_positional(pair.left, pair.right, 2));
            }
        }
        assert!(table.pairs.iter().any(|p| p.same_person == Some(true)));
    }

    #[test]
    fn duplicate_ids_fail_generation() {
        let records = vec![
            ContributionRecord::new("r1").with_person("A"),
            ContributionRecord::new("r1").with_person("B"),
        ];
        assert!(matches!(
            PairGenerator::new(1).unwrap().generate(&records),
            Err(MatchError::Core(CoreError::DuplicateRecord { .. }))
        ));
    }

    #[test]
    fn defaults_are_counted_per_feature() {
        let records = people(&[Some("A"), Some("B")]);
        let table = PairGenerator::new(1).unwrap().generate(&records).unwrap();
        assert_eq!(table.report.defaulted["workplace_distance_min"], 1);
        assert_eq!(table.report.defaulted["exact_first_name"], 1);
    }
}
