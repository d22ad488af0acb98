use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Split by person, train and cross-validate a classifier, score test profiles.
    Train(TrainArgs),
    /// Group records into profiles with a trained model.
    Resolve(ResolveArgs),
    /// Emit the candidate pair table with features.
    Pairs(PairsArgs),
    /// List the feature schema and defaults.
    Features,
    /// Print the JSON Schema of an input file.
    Schema(SchemaArgs),
}

/// Input locations; each overrides the matching `data.*` setting.
#[derive(Clone, Debug, Default, Args)]
pub struct DataArgs {
    /// Contribution records (JSON array)
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Ground truth (JSON array of contributionId/personId)
    #[arg(long)]
    pub ground_truth: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Artifact directory (overrides `output.dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Model artifact written by `persona train`
    #[arg(short, long)]
    pub model: PathBuf,

    /// Artifact directory (overrides `output.dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum PairModeArg {
    /// Drop unlabeled pairs, subsample negatives
    #[default]
    Training,
    /// Keep every pair
    Inference,
}

#[derive(Clone, Debug, Args)]
pub struct PairsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long, default_value = "training")]
    pub mode: PairModeArg,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    #[default]
    Record,
    GroundTruth,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Which input file to describe
    #[arg(default_value = "record")]
    pub kind: SchemaKind,
}
