//! Precision / recall / F1 over binary `same_person` labels.
//!
//! Undefined ratios (no predicted or no true members of a class) score 0.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// True members of the class.
    pub support: usize,
}

/// Macro-averaged report over the labels present in truth or prediction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassificationReport {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
    pub negative: Option<ClassScores>,
    pub positive: Option<ClassScores>,
}

/// One-vs-rest scores for `class`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn class_scores(truth: &[bool], predicted: &[bool], class: bool) -> ClassScores {
    let mut true_positive = 0usize;
    let mut predicted_count = 0usize;
    let mut support = 0usize;
    for (&t, &p) in truth.iter().zip(predicted) {
        if p == class {
            predicted_count += 1;
        }
        if t == class {
            support += 1;
            if p == class {
                true_positive += 1;
            }
        }
    }

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    let precision = ratio(true_positive, predicted_count);
    let recall = ratio(true_positive, support);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassScores {
        precision,
        recall,
        f1,
        support,
    }
}

/// Scores of the positive (`same_person`) class.
///
/// # Errors
///
/// Returns [`ModelError::LengthMismatch`] when the slices differ in length.
pub fn binary_scores(truth: &[bool], predicted: &[bool]) -> Result<ClassScores, ModelError> {
    check_lengths(truth, predicted)?;
    Ok(class_scores(truth, predicted, true))
}

/// Macro average over the classes that occur in either slice.
///
/// # Errors
///
/// Returns [`ModelError::LengthMismatch`] when the slices differ in length.
#[allow(clippy::cast_precision_loss)]
pub fn macro_report(truth: &[bool], predicted: &[bool]) -> Result<ClassificationReport, ModelError> {
    check_lengths(truth, predicted)?;

    let present = |class: bool| truth.contains(&class) || predicted.contains(&class);
    let negative = present(false).then(|| class_scores(truth, predicted, false));
    let positive = present(true).then(|| class_scores(truth, predicted, true));

    let classes: Vec<ClassScores> = negative.into_iter().chain(positive).collect();
    if classes.is_empty() {
        return Ok(ClassificationReport::default());
    }

    let n = classes.len() as f64;
    Ok(ClassificationReport {
        precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
        recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
        f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
        support: truth.len(),
        negative,
        positive,
    })
}

const fn check_lengths(truth: &[bool], predicted: &[bool]) -> Result<(), ModelError> {
    if truth.len() == predicted.len() {
        Ok(())
    } else {
        Err(ModelError::LengthMismatch {
            features: predicted.len(),
            labels: truth.len(),
        })
    }
}
