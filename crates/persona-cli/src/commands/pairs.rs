use anyhow::Context;
use persona_match::PairMode;
use persona_match::export::pair_rows;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{PairModeArg, PairsArgs};
use crate::context::RunContext;
use crate::progress::staged;
use crate::{input, output};

/// Handle `persona pairs`.
pub fn handle(args: &PairsArgs, ctx: &mut RunContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.apply_data_args(&args.data);

    let mode = match args.mode {
        PairModeArg::Training => PairMode::Training,
        PairModeArg::Inference => PairMode::Inference,
    };
    let records_path = ctx.config.data.require_records()?.to_path_buf();
    let truth_path = match mode {
        PairMode::Training => Some(ctx.config.data.require_ground_truth()?.to_path_buf()),
        PairMode::Inference => ctx.config.data.ground_truth.clone(),
    };
    let records = input::load_records(&records_path, truth_path.as_deref())?;

    let generator = ctx.pair_generator(mode)?;
    let table = staged("generating candidate pairs", || generator.generate(&records))
        .context("candidate pair generation failed")?;
    ctx.record_generation("pairs", &table.report);

    let rows = pair_rows(&table, &records).context("failed to render pair rows")?;
    output::output(&rows, flags.format)
}
