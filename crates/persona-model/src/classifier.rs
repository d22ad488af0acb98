//! The pluggable same-person classifier.

use persona_core::{FeatureMatrix, Verdict};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::folds::{complement, stratified_folds};
use crate::metrics::binary_scores;

/// Contribution of one feature column to a trained model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    pub feature: String,
    pub weight: f64,
}

/// Held-out scores of one cross-validation fold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoldMetrics {
    pub fold: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Binary classifier over a named feature matrix.
///
/// Hyperparameters live on the implementor; the trained state is a separate,
/// serializable `Model` so it can be persisted and reloaded for inference.
/// Implementations must be deterministic for fixed hyperparameters.
pub trait Classifier: Sync {
    type Model: Serialize + DeserializeOwned + Send + Sync;

    /// Short identifier recorded alongside persisted models.
    fn name(&self) -> &'static str;

    /// Fit a model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] for empty or single-class training data,
    /// mismatched lengths, or invalid hyperparameters.
    fn train(&self, features: &FeatureMatrix, labels: &[bool]) -> Result<Self::Model, ModelError>;

    /// One verdict per feature row, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FeatureMismatch`] when the columns differ from
    /// those the model was trained on.
    fn predict(&self, model: &Self::Model, features: &FeatureMatrix) -> Result<Vec<Verdict>, ModelError>;

    fn feature_importances(&self, model: &Self::Model) -> Vec<FeatureImportance>;

    /// Stratified k-fold cross-validation scored by positive-class F1.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidFolds`] when `folds` cannot partition the
    /// samples, or any error from training or prediction on a fold.
    fn cross_validate(
        &self,
        features: &FeatureMatrix,
        labels: &[bool],
        folds: usize,
    ) -> Result<Vec<FoldMetrics>, ModelError> {
        if features.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }

        stratified_folds(labels, folds)?
            .into_iter()
            .enumerate()
            .map(|(fold, test)| {
                let train = complement(labels.len(), &test);
                let train_labels: Vec<bool> = train.iter().map(|&i| labels[i]).collect();
                let test_labels: Vec<bool> = test.iter().map(|&i| labels[i]).collect();

                let model = self.train(&features.subset(&train), &train_labels)?;
                let predicted: Vec<bool> = self
                    .predict(&model, &features.subset(&test))?
                    .into_iter()
                    .map(|verdict| verdict.same_person)
                    .collect();
                let scores = binary_scores(&test_labels, &predicted)?;
                debug!(fold, f1 = scores.f1, "cross-validation fold scored");

                Ok(FoldMetrics {
                    fold,
                    precision: scores.precision,
                    recall: scores.recall,
                    f1: scores.f1,
                    train_size: train.len(),
                    test_size: test.len(),
                })
            })
            .collect()
    }
}

/// Mean F1 across folds; `None` for no folds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_f1(folds: &[FoldMetrics]) -> Option<f64> {
    if folds.is_empty() {
        None
    } else {
        Some(folds.iter().map(|fold| fold.f1).sum::<f64>() / folds.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use persona_core::FeatureMatrix;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Predicts positive when the first column exceeds a learned midpoint.
    struct Threshold;

    impl Classifier for Threshold {
        type Model = f64;

        fn name(&self) -> &'static str {
            "threshold"
        }

        fn train(&self, features: &FeatureMatrix, labels: &[bool]) -> Result<f64, ModelError> {
            let mean = |class: bool| {
                let values: Vec<f64> = features
                    .rows()
                    .iter()
                    .zip(labels)
                    .filter(|(_, label)| **label == class)
                    .map(|(row, _)| row[0])
                    .collect();
                values.iter().sum::<f64>() / values.len().max(1) as f64
            };
            Ok(f64::midpoint(mean(true), mean(false)))
        }

        fn predict(&self, model: &f64, features: &FeatureMatrix) -> Result<Vec<Verdict>, ModelError> {
            Ok(features
                .rows()
                .iter()
                .map(|row| {
                    if row[0] > *model {
                        Verdict::positive(1.0)
                    } else {
                        Verdict::negative(0.0)
                    }
                })
                .collect())
        }

        fn feature_importances(&self, _model: &f64) -> Vec<FeatureImportance> {
            Vec::new()
        }
    }

    fn separable() -> (FeatureMatrix, Vec<bool>) {
        let rows: Vec<Vec<f64>> = (0..10)
            .map(|i| vec![f64::from(if i < 5 { i } else { i + 10 })])
            .collect();
        let labels = (0..10).map(|i| i >= 5).collect();
        (FeatureMatrix::new(vec!["x".into()], rows).unwrap(), labels)
    }

    #[test]
    fn default_cross_validation_scores_every_fold() {
        let (features, labels) = separable();
        let folds = Threshold.cross_validate(&features, &labels, 5).unwrap();

        assert_eq!(folds.len(), 5);
        assert_eq!(folds.iter().map(|f| f.test_size).sum::<usize>(), 10);
        assert!(folds.iter().all(|f| f.train_size + f.test_size == 10));
        assert_eq!(mean_f1(&folds), Some(1.0));
    }

    #[test]
    fn mismatched_labels_are_rejected() {
        let (features, _) = separable();
        assert!(matches!(
            Threshold.cross_validate(&features, &[true], 2),
            Err(ModelError::LengthMismatch { .. })
        ));
    }
}
