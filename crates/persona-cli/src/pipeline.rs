//! End-to-end stages, generic over the classifier.
//!
//! Stages run strictly in sequence; I/O stays in the command handlers.

use anyhow::Context;
use chrono::Utc;
use persona_core::{ContributionRecord, EntityProfile, Verdict};
use persona_graph::{GraphBuilder, evaluate_profiles, extract_profiles};
use persona_match::{PairMode, PairTable};
use persona_model::{Classifier, macro_report, mean_f1};

use crate::artifacts::{ModelArtifact, ResolveReport, TrainReport};
use crate::context::RunContext;
use crate::input::truth_map;
use crate::progress::staged;
use crate::split::split_by_person;

pub struct TrainOutcome<M> {
    pub artifact: ModelArtifact<M>,
    pub report: TrainReport,
}

/// Split by person, cross-validate and fit on the training side, then predict
/// and cluster the test side.
pub fn train<C: Classifier>(
    ctx: &mut RunContext,
    classifier: &C,
    records: Vec<ContributionRecord>,
) -> anyhow::Result<TrainOutcome<C::Model>> {
    let selection = ctx.feature_selection()?;
    let generator = ctx.pair_generator(PairMode::Training)?;

    let split = split_by_person(records, ctx.config.split.train_ratio, ctx.config.split.seed);
    ctx.diagnostics.unassigned_records += split.unassigned;

    let train_pairs = staged("generating training pairs", || generator.generate(&split.train))
        .context("training pair generation failed")?;
    ctx.record_generation("train", &train_pairs.report);
    let test_pairs = staged("generating test pairs", || generator.generate(&split.test))
        .context("test pair generation failed")?;
    ctx.record_generation("test", &test_pairs.report);

    let train_matrix = train_pairs.matrix()?.select(&selection)?;
    let train_labels = train_pairs.labels()?;
    let folds = ctx.config.classifier.n_folds;

    let cross_validation = staged("cross-validating", || {
        classifier.cross_validate(&train_matrix, &train_labels, folds)
    })
    .context("classifier invocation failed during cross-validation")?;
    let mean_cv_f1 = mean_f1(&cross_validation);
    tracing::info!(folds, mean_f1 = ?mean_cv_f1, "cross-validation finished");

    let model = staged("training classifier", || classifier.train(&train_matrix, &train_labels))
        .context("classifier invocation failed during training")?;

    let test_matrix = test_pairs.matrix()?.select(&selection)?;
    let test_labels = test_pairs.labels()?;
    let verdicts = staged("predicting test pairs", || classifier.predict(&model, &test_matrix))
        .context("classifier invocation failed during prediction")?;
    let predicted: Vec<bool> = verdicts.iter().map(|v| v.same_person).collect();
    let classification = macro_report(&test_labels, &predicted)?;

    let profiles = cluster(&split.test, &test_pairs, &verdicts)?;
    let scores = evaluate_profiles(&profiles, &truth_map(&split.test));
    ctx.diagnostics.unscored_profiles += scores.unscored_profiles;
    tracing::info!(
        profiles = profiles.len(),
        purity = ?scores.mean_purity,
        fragmentation = ?scores.fragmentation,
        macro_f1 = classification.f1,
        "test profiles evaluated"
    );

    let created_at = Utc::now();
    let artifact = ModelArtifact {
        classifier: classifier.name().to_string(),
        created_at,
        config: ctx.config.clone(),
        importances: classifier.feature_importances(&model),
        feature_names: selection,
        cross_validation,
        mean_cv_f1,
        model,
    };
    let report = TrainReport {
        created_at,
        config: ctx.config.clone(),
        train_persons: split.train_persons,
        test_persons: split.test_persons,
        train_pairs: train_pairs.report,
        test_pairs: test_pairs.report,
        classification,
        scores,
        profiles,
        diagnostics: ctx.diagnostics.clone(),
    };
    Ok(TrainOutcome { artifact, report })
}

/// Score every pair of `records` with a trained model and group the records
/// into profiles. Records need no ground truth; any that is present is used
/// for evaluation.
pub fn resolve<C: Classifier>(
    ctx: &mut RunContext,
    classifier: &C,
    artifact: &ModelArtifact<C::Model>,
    records: &[ContributionRecord],
) -> anyhow::Result<ResolveReport> {
    let configured = ctx.feature_selection()?;
    if configured != artifact.feature_names {
        tracing::warn!("configured features differ from the model's; using the model's columns");
    }

    let generator = ctx.pair_generator(PairMode::Inference)?;
    let table = staged("generating candidate pairs", || generator.generate(records))
        .context("candidate pair generation failed")?;
    ctx.record_generation("resolve", &table.report);

    let matrix = table.matrix()?.select(&artifact.feature_names)?;
    let verdicts = staged("scoring candidate pairs", || classifier.predict(&artifact.model, &matrix))
        .context("classifier invocation failed during prediction")?;
    let profiles = cluster(records, &table, &verdicts)?;

    let labeled = records.iter().any(|r| r.person_id.is_some());
    let (classification, scores) = if labeled {
        let (indices, truth) = table.known_labels();
        let predicted: Vec<bool> = indices.iter().map(|&i| verdicts[i].same_person).collect();
        let scores = evaluate_profiles(&profiles, &truth_map(records));
        ctx.diagnostics.unscored_profiles += scores.unscored_profiles;
        (Some(macro_report(&truth, &predicted)?), Some(scores))
    } else {
        (None, None)
    };
    tracing::info!(
        records = records.len(),
        profiles = profiles.len(),
        "records resolved"
    );

    Ok(ResolveReport {
        created_at: Utc::now(),
        config: ctx.config.clone(),
        classifier: artifact.classifier.clone(),
        pairs: table.report,
        classification,
        scores,
        profiles,
        diagnostics: ctx.diagnostics.clone(),
    })
}

/// Every record becomes a vertex; positive verdicts become edges.
fn cluster(
    records: &[ContributionRecord],
    table: &PairTable,
    verdicts: &[Verdict],
) -> anyhow::Result<Vec<EntityProfile>> {
    let mut builder = GraphBuilder::new();
    builder.add_vertices(records.iter().map(|r| r.id.as_str()));
    builder.add_verdicts(&table.pairs, verdicts)?;
    Ok(extract_profiles(&builder.build()))
}

#[cfg(test)]
mod tests {
    use persona_config::PersonaConfig;
    use persona_core::{FeatureMatrix, NameField};
    use persona_model::{FeatureImportance, ModelError};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Same person iff last names match exactly.
    struct LastNameRule;

    impl Classifier for LastNameRule {
        type Model = usize;

        fn name(&self) -> &'static str {
            "last_name_rule"
        }

        fn train(&self, features: &FeatureMatrix, _labels: &[bool]) -> Result<usize, ModelError> {
            features
                .names()
                .iter()
                .position(|name| name == "exact_last_name")
                .ok_or(ModelError::EmptyTrainingSet)
        }

        fn predict(&self, column: &usize, features: &FeatureMatrix) -> Result<Vec<Verdict>, ModelError> {
            Ok(features
                .rows()
                .iter()
                .map(|row| {
                    if row[*column] > 0.5 {
                        Verdict::positive(1.0)
                    } else {
                        Verdict::negative(0.0)
                    }
                })
                .collect())
        }

        fn feature_importances(&self, _column: &usize) -> Vec<FeatureImportance> {
            Vec::new()
        }
    }

    /// A classifier that always fails.
    struct Broken;

    impl Classifier for Broken {
        type Model = ();

        fn name(&self) -> &'static str {
            "broken"
        }

        fn train(&self, _: &FeatureMatrix, _: &[bool]) -> Result<(), ModelError> {
            Err(ModelError::EmptyTrainingSet)
        }

        fn predict(&self, _model: &(), _: &FeatureMatrix) -> Result<Vec<Verdict>, ModelError> {
            Err(ModelError::EmptyTrainingSet)
        }

        fn feature_importances(&self, _model: &()) -> Vec<FeatureImportance> {
            Vec::new()
        }
    }

    fn records() -> Vec<ContributionRecord> {
        let surnames = ["curie", "noether", "meitner", "franklin", "hodgkin", "goeppert", "wu", "lamarr"];
        surnames
            .iter()
            .enumerate()
            .flat_map(|(person, surname)| {
                (0..3).map(move |k| {
                    ContributionRecord::new(format!("c{person}-{k}"))
                        .with_person(format!("p{person}"))
                        .with_name(NameField::Last, *surname)
                })
            })
            .collect()
    }

    fn context() -> RunContext {
        let mut config = PersonaConfig::default();
        config.sampling.negative_rate = 1;
        config.classifier.n_folds = 2;
        RunContext::new(config)
    }

    #[test]
    fn train_produces_pure_test_profiles() {
        let mut ctx = context();
        let outcome = train(&mut ctx, &LastNameRule, records()).unwrap();

        let report = &outcome.report;
        assert_eq!(report.train_persons.len(), 5);
        assert_eq!(report.test_persons.len(), 3);
        assert_eq!(report.profiles.len(), 3);
        assert_eq!(report.scores.mean_purity, Some(1.0));
        assert_eq!(report.scores.fragmentation, Some(1.0));
        assert!((report.classification.f1 - 1.0).abs() < 1e-12);
        assert_eq!(outcome.artifact.cross_validation.len(), 2);
        assert_eq!(outcome.artifact.feature_names.len(), 22);
    }

    #[test]
    fn resolve_groups_unlabeled_records() {
        let mut ctx = context();
        let outcome = train(&mut ctx, &LastNameRule, records()).unwrap();

        let unlabeled: Vec<ContributionRecord> = records()
            .into_iter()
            .map(|mut r| {
                r.person_id = None;
                r
            })
            .collect();
        let report = resolve(&mut context(), &LastNameRule, &outcome.artifact, &unlabeled).unwrap();

        assert_eq!(report.profiles.len(), 8);
        assert!(report.profiles.iter().all(|p| p.len() == 3));
        assert!(report.scores.is_none());
        assert_eq!(report.pairs.examined, 24 * 23 / 2);
    }

    #[test]
    fn unknown_feature_fails_before_any_pairs_are_built() {
        let mut ctx = context();
        ctx.config.features.names = vec!["height_cm".into()];

        let error = train(&mut ctx, &LastNameRule, records()).err().unwrap();

        assert!(format!("{error:#}").contains("height_cm"));
        assert_eq!(ctx.diagnostics.total_defaults(), 0);
    }

    #[test]
    fn resolve_rejects_unknown_feature_before_scoring() {
        let outcome = train(&mut context(), &LastNameRule, records()).unwrap();
        let mut ctx = context();
        ctx.config.features.names = vec!["height_cm".into()];

        assert!(resolve(&mut ctx, &LastNameRule, &outcome.artifact, &records()).is_err());
        assert_eq!(ctx.diagnostics.total_defaults(), 0);
    }

    #[test]
    fn classifier_failure_names_the_stage() {
        let error = train(&mut context(), &Broken, records()).err().unwrap();
        assert!(format!("{error:#}").contains("classifier invocation failed during cross-validation"));
    }
}
