use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};
use crate::input::{GroundTruthEntry, RawRecord};
use crate::output;

#[must_use]
pub fn input_schema(kind: SchemaKind) -> schemars::Schema {
    match kind {
        SchemaKind::Record => schemars::schema_for!(Vec<RawRecord>),
        SchemaKind::GroundTruth => schemars::schema_for!(Vec<GroundTruthEntry>),
    }
}

/// Handle `persona schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&input_schema(args.kind), flags.format)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_schema_accepts_source_export() {
        let schema = serde_json::to_value(input_schema(SchemaKind::Record)).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();

        let valid = json!([{
            "contribution_id": "c1",
            "first_name": "Ada",
            "focus_areas": ["Mathematics"],
            "workplace_coordinates": [{"lat": 51.5, "lon": -0.12}]
        }]);
        assert!(validator.is_valid(&valid));
        assert!(!validator.is_valid(&json!([{"first_name": "Ada"}])));
    }

    #[test]
    fn ground_truth_schema_uses_source_field_names() {
        let schema = serde_json::to_value(input_schema(SchemaKind::GroundTruth)).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();

        assert!(validator.is_valid(&json!([{"contributionId": "c1", "personId": "p1"}])));
        assert!(!validator.is_valid(&json!([{"contribution_id": "c1", "person_id": "p1"}])));
    }
}
