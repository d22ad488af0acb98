//! Train/test split by person, so no identity straddles both sides.

use std::collections::HashSet;

use persona_core::ContributionRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Default)]
pub struct PersonSplit {
    pub train: Vec<ContributionRecord>,
    pub test: Vec<ContributionRecord>,
    pub train_persons: Vec<String>,
    pub test_persons: Vec<String>,
    /// Records without ground truth; they belong to neither side.
    pub unassigned: usize,
}

/// Shuffle distinct person ids (first-appearance order) with a seeded RNG and
/// give the first `floor(len * train_ratio)` to training. Records keep their
/// input order within each side.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn split_by_person(records: Vec<ContributionRecord>, train_ratio: f64, seed: u64) -> PersonSplit {
    let mut seen = HashSet::new();
    let mut persons: Vec<String> = records
        .iter()
        .filter_map(|r| r.person_id.clone())
        .filter(|person| seen.insert(person.clone()))
        .collect();

    persons.shuffle(&mut StdRng::seed_from_u64(seed));
    let cut = ((persons.len() as f64) * train_ratio).floor() as usize;
    let test_persons = persons.split_off(cut.min(persons.len()));
    let train_persons = persons;

    let in_train: HashSet<&str> = train_persons.iter().map(String::as_str).collect();
    let mut split = PersonSplit::default();
    for record in records {
        match record.person_id.as_deref() {
            Some(person) if in_train.contains(person) => split.train.push(record),
            Some(_) => split.test.push(record),
            None => split.unassigned += 1,
        }
    }
    split.train_persons = train_persons;
    split.test_persons = test_persons;

    tracing::info!(
        train_records = split.train.len(),
        test_records = split.test.len(),
        train_persons = split.train_persons.len(),
        test_persons = split.test_persons.len(),
        unassigned = split.unassigned,
        "records split by person"
    );
    split
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn records() -> Vec<ContributionRecord> {
        (0..20)
            .map(|i| ContributionRecord::new(format!("c{i}")).with_person(format!("p{}", i % 10)))
            .chain([ContributionRecord::new("ghost")])
            .collect()
    }

    #[test]
    fn persons_never_straddle_sides() {
        let split = split_by_person(records(), 0.7, 0);

        assert_eq!(split.train_persons.len(), 7);
        assert_eq!(split.test_persons.len(), 3);
        assert_eq!(split.train.len() + split.test.len(), 20);
        assert_eq!(split.unassigned, 1);

        let train: HashSet<_> = split.train.iter().filter_map(|r| r.person_id.clone()).collect();
        assert!(split.test.iter().all(|r| !train.contains(r.person_id.as_ref().unwrap())));
    }

    #[test]
    fn split_is_reproducible_for_a_seed() {
        let first = split_by_person(records(), 0.5, 9);
        let second = split_by_person(records(), 0.5, 9);
        assert_eq!(first.train_persons, second.train_persons);
        assert_eq!(first.test, second.test);
    }
}
