//! Stratified k-fold assignment.

use crate::error::ModelError;

/// Test-set indices per fold.
///
/// Positives and negatives are dealt round-robin, each class in its original
/// order, so every fold gets a proportional share of both classes and every
/// sample lands in exactly one fold.
///
/// # Errors
///
/// Returns [`ModelError::InvalidFolds`] for fewer than two folds or more folds
/// than members of the smaller class, which would leave some training split
/// with a single class.
pub fn stratified_folds(labels: &[bool], folds: usize) -> Result<Vec<Vec<usize>>, ModelError> {
    if folds < 2 {
        return Err(ModelError::InvalidFolds {
            folds,
            reason: "at least two folds are required".into(),
        });
    }
    let positives = labels.iter().filter(|&&label| label).count();
    let negatives = labels.len() - positives;
    let minority = positives.min(negatives);
    if folds > minority {
        return Err(ModelError::InvalidFolds {
            folds,
            reason: format!(
                "the smaller class has only {minority} samples ({positives} positive, {negatives} negative)"
            ),
        });
    }

    let mut assignment = vec![Vec::new(); folds];
    for class in [true, false] {
        labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == class)
            .enumerate()
            .for_each(|(rank, (index, _))| assignment[rank % folds].push(index));
    }
    for fold in &mut assignment {
        fold.sort_unstable();
    }
    Ok(assignment)
}

/// Every index not in `test`, ascending.
#[must_use]
pub fn complement(len: usize, test: &[usize]) -> Vec<usize> {
    let mut in_test = vec![false; len];
    for &index in test {
        in_test[index] = true;
    }
    (0..len).filter(|&index| !in_test[index]).collect()
}
