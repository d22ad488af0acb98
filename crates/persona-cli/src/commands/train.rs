use std::path::PathBuf;

use serde::Serialize;

use crate::artifacts::{MODEL_FILE, REPORT_FILE, write_json};
use crate::cli::GlobalFlags;
use crate::cli::root_commands::TrainArgs;
use crate::context::RunContext;
use crate::{input, output, pipeline};

#[derive(Debug, Serialize)]
struct TrainSummary {
    model: PathBuf,
    report: PathBuf,
    train_persons: usize,
    test_persons: usize,
    mean_cv_f1: Option<f64>,
    test_macro_f1: f64,
    profiles: usize,
    mean_purity: Option<f64>,
    fragmentation: Option<f64>,
    dropped_pairs: usize,
    defaulted_features: usize,
}

/// Handle `persona train`.
pub fn handle(args: &TrainArgs, ctx: &mut RunContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.apply_data_args(&args.data);
    ctx.apply_output_dir(args.output.as_deref());

    let records_path = ctx.config.data.require_records()?.to_path_buf();
    let truth_path = ctx.config.data.require_ground_truth()?.to_path_buf();
    let records = input::load_records(&records_path, Some(&truth_path))?;

    let classifier = ctx.forest();
    let outcome = pipeline::train(ctx, &classifier, records)?;

    let dir = ctx.output_dir();
    let model = write_json(&dir, MODEL_FILE, &outcome.artifact)?;
    let report = write_json(&dir, REPORT_FILE, &outcome.report)?;

    let summary = TrainSummary {
        model,
        report,
        train_persons: outcome.report.train_persons.len(),
        test_persons: outcome.report.test_persons.len(),
        mean_cv_f1: outcome.artifact.mean_cv_f1,
        test_macro_f1: outcome.report.classification.f1,
        profiles: outcome.report.profiles.len(),
        mean_purity: outcome.report.scores.mean_purity,
        fragmentation: outcome.report.scores.fragmentation,
        dropped_pairs: ctx.diagnostics.dropped_pairs,
        defaulted_features: ctx.diagnostics.total_defaults(),
    };
    output::output(&summary, flags.format)
}
