//! Profile purity and person fragmentation against ground truth.
//!
//! Only members with a known person id count. A profile with no such member
//! is left out of both scores and reported as unscored.

use std::collections::{BTreeMap, HashMap};

use persona_core::EntityProfile;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileScores {
    /// Unweighted mean of per-profile purity; `None` when nothing was scored.
    pub mean_purity: Option<f64>,
    /// Mean number of profiles each referenced person appears in.
    pub fragmentation: Option<f64>,
    /// Purity per profile, aligned with the input; `None` for unscored ones.
    pub profile_purities: Vec<Option<f64>>,
    pub scored_profiles: usize,
    pub unscored_profiles: usize,
    /// Distinct person ids referenced by scored profiles.
    pub persons: usize,
}

/// Score `profiles` against a record id to person id map.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate_profiles(
    profiles: &[EntityProfile],
    truth: &HashMap<String, String>,
) -> ProfileScores {
    let mut profile_purities = Vec::with_capacity(profiles.len());
    let mut profiles_per_person: BTreeMap<&str, usize> = BTreeMap::new();

    for profile in profiles {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for member in &profile.members {
            if let Some(person) = truth.get(member) {
                *counts.entry(person.as_str()).or_default() += 1;
            }
        }

        let known: usize = counts.values().sum();
        if known == 0 {
            profile_purities.push(None);
            continue;
        }
        let majority = counts.values().copied().max().unwrap_or(0);
        profile_purities.push(Some(majority as f64 / known as f64));

        for person in counts.keys() {
            *profiles_per_person.entry(*person).or_default() += 1;
        }
    }

    let scored: Vec<f64> = profile_purities.iter().flatten().copied().collect();
    let mean_purity = (!scored.is_empty()).then(|| scored.iter().sum::<f64>() / scored.len() as f64);
    let fragmentation = (!profiles_per_person.is_empty()).then(|| {
        profiles_per_person.values().sum::<usize>() as f64 / profiles_per_person.len() as f64
    });

    let scores = ProfileScores {
        mean_purity,
        fragmentation,
        scored_profiles: scored.len(),
        unscored_profiles: profile_purities.len() - scored.len(),
        persons: profiles_per_person.len(),
        profile_purities,
    };
    debug!(
        scored = scores.scored_profiles,
        unscored = scores.unscored_profiles,
        persons = scores.persons,
        "profiles evaluated"
    );
    scores
}
