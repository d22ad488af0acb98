use std::path::PathBuf;

use persona_model::ForestModel;
use serde::Serialize;

use crate::artifacts::{PROFILES_FILE, read_model, write_json};
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::context::RunContext;
use crate::{input, output, pipeline};

#[derive(Debug, Serialize)]
struct ResolveSummary {
    profiles_file: PathBuf,
    records: usize,
    profiles: usize,
    singletons: usize,
    largest_profile: usize,
    mean_purity: Option<f64>,
    fragmentation: Option<f64>,
    macro_f1: Option<f64>,
}

/// Handle `persona resolve`.
pub fn handle(args: &ResolveArgs, ctx: &mut RunContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.apply_data_args(&args.data);
    ctx.apply_output_dir(args.output.as_deref());

    let artifact = read_model::<ForestModel>(&args.model)?;
    let records_path = ctx.config.data.require_records()?.to_path_buf();
    let truth_path = ctx.config.data.ground_truth.clone();
    let records = input::load_records(&records_path, truth_path.as_deref())?;

    let classifier = ctx.forest();
    let report = pipeline::resolve(ctx, &classifier, &artifact, &records)?;
    let profiles_file = write_json(&ctx.output_dir(), PROFILES_FILE, &report)?;

    let summary = ResolveSummary {
        profiles_file,
        records: records.len(),
        profiles: report.profiles.len(),
        singletons: report.profiles.iter().filter(|p| p.is_singleton()).count(),
        largest_profile: report.profiles.iter().map(|p| p.len()).max().unwrap_or(0),
        mean_purity: report.scores.as_ref().and_then(|s| s.mean_purity),
        fragmentation: report.scores.as_ref().and_then(|s| s.fragmentation),
        macro_f1: report.classification.as_ref().map(|c| c.f1),
    };
    output::output(&summary, flags.format)
}
