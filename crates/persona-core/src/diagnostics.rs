//! Countable record of everything a run dropped or defaulted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostics {
    /// Pairs excluded from label-bearing tables for missing ground truth.
    pub dropped_pairs: usize,
    /// Feature name -> number of pairs where the default value was used.
    pub defaulted_features: BTreeMap<String, usize>,
    /// Records that could not be assigned to either side of a person split.
    pub unassigned_records: usize,
    /// Profiles with no member of known ground truth.
    pub unscored_profiles: usize,
}

impl Diagnostics {
    pub fn add_defaults<'a, I>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (&'a String, &'a usize)>,
    {
        for (feature, count) in defaults {
            *self.defaulted_features.entry(feature.clone()).or_default() += count;
        }
    }

    #[must_use]
    pub fn total_defaults(&self) -> usize {
        self.defaulted_features.values().sum()
    }
}
