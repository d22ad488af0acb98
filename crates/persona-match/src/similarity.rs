//! Pure similarity metrics over normalized field values.
//!
//! Each metric returns `Err(FeatureFault)` instead of a score when its input
//! cannot be scored; the schema decides the default.

use std::collections::HashSet;

use rapidfuzz::fuzz;
use rphonetic::{Encoder, Soundex};

use crate::error::FeatureFault;

/// 1 when both values are present and equal, 0 when present and different.
///
/// # Errors
///
/// [`FeatureFault::EmptyField`] when either side is absent.
pub fn exact_match(a: Option<&str>, b: Option<&str>) -> Result<f64, FeatureFault> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(if a == b { 1.0 } else { 0.0 }),
        _ => Err(FeatureFault::EmptyField),
    }
}

/// Whole-string indel similarity on a 0-100 scale.
///
/// A substitution counts as one deletion plus one insertion, so `ab`/`ba`
/// scores 50 and `abc`/`abcd` scores 86.
///
/// # Errors
///
/// [`FeatureFault::EmptyField`] when either string is empty.
pub fn fuzzy_ratio(a: &str, b: &str) -> Result<u32, FeatureFault> {
    if a.is_empty() || b.is_empty() {
        return Err(FeatureFault::EmptyField);
    }
    Ok(to_percent(fuzz::ratio(a.chars(), b.chars())))
}

/// Best indel similarity of the shorter string against every equally long
/// window of the longer one, on a 0-100 scale.
///
/// # Errors
///
/// [`FeatureFault::EmptyField`] when either string is empty.
pub fn fuzzy_partial_ratio(a: &str, b: &str) -> Result<u32, FeatureFault> {
    if a.is_empty() || b.is_empty() {
        return Err(FeatureFault::EmptyField);
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    let best = longer
        .windows(shorter.len())
        .map(|window| fuzz::ratio(shorter.iter().copied(), window.iter().copied()))
        .fold(0.0_f64, f64::max);

    Ok(to_percent(best))
}

/// Soundex code for a normalized value.
///
/// Only ASCII letters are encoded.
///
/// # Errors
///
/// [`FeatureFault::EmptyField`] for an empty value,
/// [`FeatureFault::MalformedPhoneticInput`] when no encodable letter remains.
pub fn soundex_code(value: &str) -> Result<String, FeatureFault> {
    if value.is_empty() {
        return Err(FeatureFault::EmptyField);
    }

    let letters: String = value.chars().filter(char::is_ascii_alphabetic).collect();
    if letters.is_empty() {
        return Err(FeatureFault::MalformedPhoneticInput);
    }

    let code = Soundex::default().encode(&letters);
    if code.is_empty() {
        return Err(FeatureFault::MalformedPhoneticInput);
    }
    Ok(code)
}

/// 1 when both values share a Soundex code, else 0.
///
/// # Errors
///
/// Propagates the fault of whichever side cannot be encoded.
pub fn soundex_match(a: Option<&str>, b: Option<&str>) -> Result<f64, FeatureFault> {
    let (Some(a), Some(b)) = (a, b) else {
        return Err(FeatureFault::EmptyField);
    };
    let a = soundex_code(a)?;
    let b = soundex_code(b)?;
    Ok(if a == b { 1.0 } else { 0.0 })
}

/// Size of the intersection of two token sets.
#[must_use]
pub fn shared_tokens(a: &[String], b: &[String]) -> usize {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    b.iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(&a)
        .count()
}

/// Halves round to even.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(similarity: f64) -> u32 {
    (similarity.clamp(0.0, 1.0) * 100.0).round_ties_even() as u32
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("smith"), Some("smith"), Ok(1.0))]
    #[case(Some("smith"), Some("smyth"), Ok(0.0))]
    #[case(None, Some("smith"), Err(FeatureFault::EmptyField))]
    #[case(None, None, Err(FeatureFault::EmptyField))]
    fn exact_match_cases(
        #[case] a: Option<&str>,
        #[case] b: Option<&str>,
        #[case] expected: Result<f64, FeatureFault>,
    ) {
        assert_eq!(exact_match(a, b), expected);
    }

    #[rstest]
    #[case("maria", "maria", 100)]
    #[case("abc", "xyz", 0)]
    #[case("maria", "marie", 80)]
    #[case("ab", "ba", 50)]
    #[case("abc", "abcd", 86)]
    #[case("jon", "john", 86)]
    fn fuzzy_ratio_counts_substitutions_twice(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: u32,
    ) {
        assert_eq!(fuzzy_ratio(a, b), Ok(expected));
        assert_eq!(fuzzy_ratio(b, a), Ok(expected));
    }

    #[test]
    fn partial_ratio_scores_windows_by_indel() {
        assert_eq!(fuzzy_partial_ratio("abc", "abcd"), Ok(100));
        assert_eq!(fuzzy_partial_ratio("ab", "xbay"), Ok(50));
        assert_eq!(fuzzy_partial_ratio("jon", "john smith"), Ok(67));
    }

    #[test]
    fn fuzzy_scores_are_zero_safe_on_empty_input() {
        assert_eq!(fuzzy_ratio("", "maria"), Err(FeatureFault::EmptyField));
        assert_eq!(fuzzy_partial_ratio("maria", ""), Err(FeatureFault::EmptyField));
    }

    #[test]
    fn partial_ratio_finds_embedded_substring() {
        assert_eq!(fuzzy_partial_ratio("curie", "marie curie"), Ok(100));
        assert_eq!(fuzzy_partial_ratio("marie curie", "curie"), Ok(100));
        assert!(fuzzy_ratio("curie", "marie curie").unwrap() < 100);
    }

    #[test]
    fn soundex_groups_sound_alikes() {
        assert_eq!(soundex_code("robert").unwrap(), "R163");
        assert_eq!(soundex_match(Some("robert"), Some("rupert")), Ok(1.0));
        assert_eq!(soundex_match(Some("robert"), Some("smith")), Ok(0.0));
    }

    #[test]
    fn soundex_faults_are_distinguished() {
        assert_eq!(soundex_code(""), Err(FeatureFault::EmptyField));
        assert_eq!(
            soundex_code("123 ?!"),
            Err(FeatureFault::MalformedPhoneticInput)
        );
        assert_eq!(soundex_match(Some("ørsted"), Some("rsted")), Ok(1.0));
        assert_eq!(soundex_match(Some("smith"), None), Err(FeatureFault::EmptyField));
    }

    #[test]
    fn shared_tokens_counts_set_intersection() {
        let a = vec!["physics".to_string(), "chemistry".to_string(), "physics".to_string()];
        let b = vec!["physics".to_string(), "biology".to_string()];
        assert_eq!(shared_tokens(&a, &b), 1);
        assert_eq!(shared_tokens(&a, &[]), 0);
    }
}
