//! Seeded random forest of Gini CART trees.
//!
//! Each tree draws its bootstrap sample and its per-split feature subsets
//! (`√d` columns) from its own `StdRng`, seeded with `seed + tree_index`.
//! Trees are grown in parallel; the result does not depend on scheduling.

mod tree;

use persona_core::{FeatureMatrix, Verdict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use tree::{DecisionTree, Node};

use crate::classifier::{Classifier, FeatureImportance};
use crate::error::ModelError;
use tree::TreeGrower;

/// Probability above which a pair is predicted to be the same person.
pub const DECISION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForestParams {
    pub max_depth: usize,
    pub n_estimators: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            max_depth: 10,
            n_estimators: 100,
            seed: 0,
        }
    }
}

impl ForestParams {
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] for a zero depth or tree count.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.max_depth == 0 {
            return Err(ModelError::InvalidParameter {
                name: "max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidParameter {
                name: "n_estimators".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Trained forest: trees plus the column order they expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForestModel {
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
    /// Normalized mean decrease in impurity, aligned with `feature_names`.
    importances: Vec<f64>,
}

impl ForestModel {
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    #[must_use]
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Mean positive-class probability over all trees.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn probability(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|tree| tree.probability(row)).sum::<f64>() / self.trees.len() as f64
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomForest {
    params: ForestParams,
}

impl RandomForest {
    #[must_use]
    pub const fn new(params: ForestParams) -> Self {
        Self { params }
    }
}

impl Classifier for RandomForest {
    type Model = ForestModel;

    fn name(&self) -> &'static str {
        "random_forest"
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    fn train(&self, features: &FeatureMatrix, labels: &[bool]) -> Result<ForestModel, ModelError> {
        self.params.validate()?;
        if features.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if features.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if features.width() == 0 {
            return Err(ModelError::InvalidParameter {
                name: "features".into(),
                reason: "no feature columns selected".into(),
            });
        }
        if labels.iter().all(|&label| label == labels[0]) {
            return Err(ModelError::SingleClass { class: labels[0] });
        }

        let width = features.width();
        let max_features = ((width as f64).sqrt().floor() as usize).max(1);
        let rows = features.rows();
        let n = rows.len();
        let ForestParams {
            max_depth,
            n_estimators,
            seed,
        } = self.params;

        let grown: Vec<_> = (0..n_estimators)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                TreeGrower::new(rows, labels, max_depth, max_features, &mut rng).grow(bootstrap)
            })
            .collect();

        let mut importances = vec![0.0; width];
        let mut trees = Vec::with_capacity(grown.len());
        for tree in grown {
            let total: f64 = tree.importances.iter().sum();
            if total > 0.0 {
                for (sum, value) in importances.iter_mut().zip(&tree.importances) {
                    *sum += value / total;
                }
            }
            trees.push(tree.tree);
        }
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for value in &mut importances {
                *value /= total;
            }
        }

        debug!(trees = trees.len(), samples = n, width, "forest trained");
        Ok(ForestModel {
            feature_names: features.names().to_vec(),
            trees,
            importances,
        })
    }

    fn predict(&self, model: &ForestModel, features: &FeatureMatrix) -> Result<Vec<Verdict>, ModelError> {
        if features.names() != model.feature_names.as_slice() {
            return Err(ModelError::FeatureMismatch {
                expected: model.feature_names.clone(),
                found: features.names().to_vec(),
            });
        }

        Ok(features
            .rows()
            .par_iter()
            .map(|row| {
                let score = model.probability(row);
                if score > DECISION_THRESHOLD {
                    Verdict::positive(score)
                } else {
                    Verdict::negative(score)
                }
            })
            .collect())
    }

    fn feature_importances(&self, model: &ForestModel) -> Vec<FeatureImportance> {
        model
            .feature_names
            .iter()
            .zip(&model.importances)
            .map(|(feature, &weight)| FeatureImportance {
                feature: feature.clone(),
                weight,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    /// Column `signal` decides the label; column `noise` is irrelevant.
    fn dataset() -> (FeatureMatrix, Vec<bool>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40u32 {
            let positive = i % 4 == 0;
            let signal = if positive { 90.0 } else { 20.0 } + f64::from(i % 3);
            rows.push(vec![signal, f64::from(i % 7)]);
            labels.push(positive);
        }
        (
            FeatureMatrix::new(vec!["signal".into(), "noise".into()], rows).unwrap(),
            labels,
        )
    }

    fn forest(n_estimators: usize) -> RandomForest {
        RandomForest::new(ForestParams {
            max_depth: 4,
            n_estimators,
            seed: 0,
        })
    }

    #[test]
    fn learns_a_separable_signal() {
        let (features, labels) = dataset();
        let classifier = forest(25);
        let model = classifier.train(&features, &labels).unwrap();
        let predicted: Vec<bool> = classifier
            .predict(&model, &features)
            .unwrap()
            .into_iter()
            .map(|v| v.same_person)
            .collect();
        assert_eq!(predicted, labels);
    }

    #[test]
    fn training_is_deterministic_for_a_seed() {
        let (features, labels) = dataset();
        let first = forest(10).train(&features, &labels).unwrap();
        let second = forest(10).train(&features, &labels).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn importances_are_normalized() {
        let (features, labels) = dataset();
        let classifier = forest(10);
        let model = classifier.train(&features, &labels).unwrap();
        let importances = classifier.feature_importances(&model);

        let total: f64 = importances.iter().map(|i| i.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(importances[0].feature, "signal");
        assert!(importances[0].weight > importances[1].weight);
    }

    #[test]
    fn prediction_rejects_reordered_columns() {
        let (features, labels) = dataset();
        let classifier = forest(3);
        let model = classifier.train(&features, &labels).unwrap();
        let reordered = features.select(&["noise", "signal"]).unwrap();

        assert!(matches!(
            classifier.predict(&model, &reordered),
            Err(ModelError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn single_class_labels_are_rejected() {
        let (features, _) = dataset();
        let labels = vec![false; features.len()];
        assert!(matches!(
            forest(3).train(&features, &labels),
            Err(ModelError::SingleClass { class: false })
        ));
    }

    #[rstest]
    #[case(ForestParams { max_depth: 0, n_estimators: 5, seed: 0 }, "max_depth")]
    #[case(ForestParams { max_depth: 3, n_estimators: 0, seed: 0 }, "n_estimators")]
    fn invalid_params_are_rejected(#[case] params: ForestParams, #[case] field: &str) {
        let (features, labels) = dataset();
        match RandomForest::new(params).train(&features, &labels) {
            Err(ModelError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("expected invalid parameter, got {other:?}"),
        }
    }

    #[test]
    fn model_survives_json_roundtrip() {
        let (features, labels) = dataset();
        let model = forest(2).train(&features, &labels).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: ForestModel = serde_json::from_str(&json).unwrap();

        let classifier = forest(2);
        assert_eq!(back.trees().len(), 2);
        assert_eq!(
            classifier.predict(&back, &features).unwrap().iter().map(|v| v.same_person).collect::<Vec<_>>(),
            classifier.predict(&model, &features).unwrap().iter().map(|v| v.same_person).collect::<Vec<_>>()
        );
    }
}
