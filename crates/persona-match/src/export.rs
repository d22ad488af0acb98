//! Flat row export of a pair table.
//!
//! Each row carries the left record's columns as-is, the right record's
//! columns suffixed `_2nd`, every feature by name, and `same_person` as
//! 1 / 0 / null.

use persona_core::ContributionRecord;
use serde_json::{Map, Value};

use crate::pairs::PairTable;

pub const SECOND_SUFFIX: &str = "_2nd";

/// Render every pair as one JSON object.
///
/// # Errors
///
/// Returns a serialization error if a record cannot be converted to JSON.
pub fn pair_rows(
    table: &PairTable,
    records: &[ContributionRecord],
) -> Result<Vec<Map<String, Value>>, serde_json::Error> {
    table
        .pairs
        .iter()
        .map(|pair| {
            let mut row = Map::new();
            for (key, value) in record_columns(&records[pair.left])? {
                row.insert(key, value);
            }
            for (key, value) in record_columns(&records[pair.right])? {
                row.insert(format!("{key}{SECOND_SUFFIX}"), value);
            }
            for (name, value) in table.feature_names.iter().zip(&pair.features) {
                row.insert(name.clone(), Value::from(*value));
            }
            row.insert(
                "same_person".into(),
                pair.same_person
                    .map_or(Value::Null, |same| Value::from(u8::from(same))),
            );
            Ok(row)
        })
        .collect()
}

fn record_columns(record: &ContributionRecord) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use persona_core::NameField;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pairs::PairGenerator;

    #[test]
    fn second_record_columns_are_suffixed() {
        let records = vec![
            ContributionRecord::new("c1")
                .with_person("p1")
                .with_name(NameField::Last, "hopper"),
            ContributionRecord::new("c2")
                .with_person("p1")
                .with_name(NameField::Last, "hopper"),
        ];
        let table = PairGenerator::new(1).unwrap().generate(&records).unwrap();
        let rows = pair_rows(&table, &records).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row["id"], Value::from("c1"));
        assert_eq!(row["id_2nd"], Value::from("c2"));
        assert_eq!(row["last_name_2nd"], Value::from("hopper"));
        assert_eq!(row["exact_last_name"], Value::from(1.0));
        assert_eq!(row["same_person"], Value::from(1));
    }
}
