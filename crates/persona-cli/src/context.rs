use std::path::{Path, PathBuf};

use anyhow::Context;
use persona_config::{PersonaConfig, SamplingStrategy as ConfiguredStrategy};
use persona_core::Diagnostics;
use persona_match::{GenerationReport, PairGenerator, PairMode, SamplingStrategy, resolve_selection};
use persona_model::{ForestParams, RandomForest};

use crate::cli::root_commands::DataArgs;

/// Everything a run needs, passed explicitly through every stage.
#[derive(Debug)]
pub struct RunContext {
    pub config: PersonaConfig,
    pub diagnostics: Diagnostics,
}

impl RunContext {
    #[must_use]
    pub fn new(config: PersonaConfig) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Command-line paths win over configured ones.
    pub fn apply_data_args(&mut self, args: &DataArgs) {
        if let Some(records) = &args.records {
            self.config.data.records = Some(records.clone());
        }
        if let Some(ground_truth) = &args.ground_truth {
            self.config.data.ground_truth = Some(ground_truth.clone());
        }
    }

    pub fn apply_output_dir(&mut self, dir: Option<&Path>) {
        if let Some(dir) = dir {
            self.config.output.dir = dir.to_path_buf();
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.config.output.dir.clone()
    }

    pub fn pair_generator(&self, mode: PairMode) -> anyhow::Result<PairGenerator> {
        let strategy = match self.config.sampling.strategy {
            ConfiguredStrategy::Sequential => SamplingStrategy::Sequential,
            ConfiguredStrategy::Positional => SamplingStrategy::Positional,
        };
        Ok(PairGenerator::new(self.config.sampling.negative_rate)
            .context("invalid negative sampling rate")?
            .with_strategy(strategy)
            .with_mode(mode))
    }

    /// Ordered classifier input columns; every schema feature when unset.
    pub fn feature_selection(&self) -> anyhow::Result<Vec<String>> {
        resolve_selection(&self.config.features.names).context("invalid feature selection")
    }

    #[must_use]
    pub const fn forest(&self) -> RandomForest {
        RandomForest::new(ForestParams {
            max_depth: self.config.classifier.max_depth,
            n_estimators: self.config.classifier.n_estimators,
            seed: self.config.classifier.seed,
        })
    }

    /// Fold one generation run into the diagnostics.
    pub fn record_generation(&mut self, stage: &str, report: &GenerationReport) {
        self.diagnostics.dropped_pairs += report.dropped_missing_truth;
        self.diagnostics.add_defaults(&report.defaulted);

        tracing::info!(
            stage,
            records = report.records,
            positives = report.positives,
            negatives = report.negatives_retained,
            unlabeled = report.unlabeled,
            dropped = report.dropped_missing_truth,
            "candidate pairs generated"
        );
    }
}
