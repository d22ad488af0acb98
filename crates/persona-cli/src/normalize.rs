//! Cleaning rules for raw exports.
//!
//! Names: `.` removed, `-` becomes a space, lowercased, whitespace collapsed.
//! Tokens: lowercased, `. / - , ; : [ ] ( )` become spaces, whitespace
//! collapsed. Values that end up empty are treated as absent.

use persona_core::ContributionRecord;

use crate::input::RawRecord;

const TOKEN_SEPARATORS: &[char] = &['.', '/', '-', ',', ';', ':', '[', ']', '(', ')'];

#[must_use]
pub fn clean_name(raw: &str) -> Option<String> {
    let replaced: String = raw
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    collapse(&replaced.to_lowercase())
}

#[must_use]
pub fn clean_token(raw: &str) -> Option<String> {
    let replaced: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if TOKEN_SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();
    collapse(&replaced)
}

fn collapse(value: &str) -> Option<String> {
    let joined = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn clean_tokens(raw: Option<Vec<String>>) -> Vec<String> {
    raw.unwrap_or_default()
        .iter()
        .filter_map(|token| clean_token(token))
        .collect()
}

/// Clean every field of a raw record. Ground truth is attached separately.
#[must_use]
pub fn normalize(raw: RawRecord) -> ContributionRecord {
    let name = |value: Option<String>| value.as_deref().and_then(clean_name);
    ContributionRecord {
        id: raw.contribution_id,
        first_name: name(raw.first_name),
        middle_name: name(raw.middle_name),
        last_name: name(raw.last_name),
        full_name: name(raw.full_name),
        workplace: name(raw.workplace),
        focus_areas: clean_tokens(raw.focus_areas),
        orgs: clean_tokens(raw.orgs),
        gpes: clean_tokens(raw.gpes),
        workplace_coordinates: raw.workplace_coordinates.unwrap_or_default(),
        person_id: None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("J.R.R.", Some("jrr"))]
    #[case("Jean-Luc", Some("jean luc"))]
    #[case("  Van   DER Berg ", Some("van der berg"))]
    #[case("-.", None)]
    #[case("", None)]
    fn names_are_cleaned(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(clean_name(raw).as_deref(), expected);
    }

    #[rstest]
    #[case("Machine-Learning", Some("machine learning"))]
    #[case("U.S.A.", Some("u s a"))]
    #[case("Physics (Applied); Optics", Some("physics applied optics"))]
    #[case("[ ]", None)]
    fn tokens_are_cleaned(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(clean_token(raw).as_deref(), expected);
    }

    #[test]
    fn raw_record_is_normalized() {
        let raw = RawRecord {
            contribution_id: "c1".into(),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace-Byron".into()),
            focus_areas: Some(vec!["Analytical Engines".into(), "()".into()]),
            gpes: None,
            ..RawRecord::default()
        };
        let record = normalize(raw);

        assert_eq!(record.id, "c1");
        assert_eq!(record.first_name.as_deref(), Some("ada"));
        assert_eq!(record.last_name.as_deref(), Some("lovelace byron"));
        assert_eq!(record.middle_name, None);
        assert_eq!(record.focus_areas, ["analytical engines"]);
        assert!(record.gpes.is_empty());
        assert_eq!(record.person_id, None);
    }
}
