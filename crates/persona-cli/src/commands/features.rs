use persona_match::FEATURES;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output;

#[derive(Debug, Serialize)]
struct FeatureRow {
    position: usize,
    name: &'static str,
    default: f64,
}

/// Handle `persona features`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<FeatureRow> = FEATURES
        .iter()
        .enumerate()
        .map(|(position, descriptor)| FeatureRow {
            position,
            name: descriptor.name,
            default: descriptor.default,
        })
        .collect();
    output::output(&rows, flags.format)
}
