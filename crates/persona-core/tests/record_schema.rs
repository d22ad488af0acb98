//! Serde roundtrip and JsonSchema validation for the record types.

use persona_core::{ContributionRecord, GeoPoint, ListField, NameField};
use schemars::schema_for;

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn full_record_roundtrips_and_validates() {
    let record = ContributionRecord::new("contrib-17")
        .with_name(NameField::First, "ada")
        .with_name(NameField::Last, "lovelace")
        .with_name(NameField::Full, "ada lovelace")
        .with_name(NameField::Workplace, "analytical engine society")
        .with_tokens(ListField::FocusAreas, ["mathematics", "computing"])
        .with_tokens(ListField::Gpes, ["london"])
        .with_coordinates([GeoPoint::new(51.5072, -0.1276)])
        .with_person("person-1");

    let json = serde_json::to_string_pretty(&record).unwrap();
    let recovered: ContributionRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, record);

    let schema = serde_json::to_value(schema_for!(ContributionRecord)).unwrap();
    let instance = serde_json::to_value(&record).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn schema_rejects_record_without_id() {
    let schema = serde_json::to_value(schema_for!(ContributionRecord)).unwrap();
    let instance = serde_json::json!({ "first_name": "ada" });
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}
