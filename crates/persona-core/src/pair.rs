use serde::{Deserialize, Serialize};

/// Two records considered jointly for a same/different-person decision.
///
/// `left` always precedes `right` in generation order; the reverse pair is
/// never produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidatePair {
    /// Row index of the left record in the generating batch.
    pub left: usize,
    /// Row index of the right record in the generating batch.
    pub right: usize,
    pub left_id: String,
    pub right_id: String,
    /// Values in feature-schema order.
    pub features: Vec<f64>,
    /// `Some(true)` iff both ground truths are known and equal.
    pub same_person: Option<bool>,
}

impl CandidatePair {
    /// Unordered key used to detect duplicate evaluations.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        if self.left_id <= self.right_id {
            (&self.left_id, &self.right_id)
        } else {
            (&self.right_id, &self.left_id)
        }
    }
}

/// A classifier decision for one pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub same_person: bool,
    /// Positive-class probability in `[0, 1]`.
    pub score: f64,
}

impl Verdict {
    #[must_use]
    pub const fn positive(score: f64) -> Self {
        Self {
            same_person: true,
            score,
        }
    }

    #[must_use]
    pub const fn negative(score: f64) -> Self {
        Self {
            same_person: false,
            score,
        }
    }
}
