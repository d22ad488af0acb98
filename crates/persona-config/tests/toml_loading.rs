//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use std::path::{Path, PathBuf};

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use persona_config::{PersonaConfig, SamplingStrategy};

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[data]
records = "data/contributions.json"
ground_truth = "data/ground_truth.json"

[sampling]
negative_rate = 3
strategy = "positional"

[split]
train_ratio = 0.8
seed = 42

[classifier]
max_depth = 4
n_estimators = 25
n_folds = 3
seed = 7

[features]
names = ["exact_last_name", "soundex_first_name"]

[output]
dir = "out"
"#,
        )?;

        let config: PersonaConfig = Figment::from(Serialized::defaults(PersonaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.data.records.as_deref(),
            Some(Path::new("data/contributions.json"))
        );
        assert_eq!(config.sampling.negative_rate, 3);
        assert_eq!(config.sampling.strategy, SamplingStrategy::Positional);
        assert!((config.split.train_ratio - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.split.seed, 42);
        assert_eq!(config.classifier.max_depth, 4);
        assert_eq!(config.classifier.n_estimators, 25);
        assert_eq!(config.classifier.n_folds, 3);
        assert_eq!(config.classifier.seed, 7);
        assert_eq!(
            config.features.names,
            vec!["exact_last_name".to_string(), "soundex_first_name".to_string()]
        );
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[classifier]
max_depth = 3
",
        )?;

        let config: PersonaConfig = Figment::from(Serialized::defaults(PersonaConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.classifier.max_depth, 3);
        assert_eq!(config.classifier.n_estimators, 100);
        assert_eq!(config.sampling.negative_rate, 6);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".persona")?;
        jail.create_file(
            ".persona/config.toml",
            r"
[sampling]
negative_rate = 9
",
        )?;

        let config = PersonaConfig::load(None).expect("config should load");
        assert_eq!(config.sampling.negative_rate, 9);
        Ok(())
    });
}

#[test]
fn explicit_file_overrides_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".persona")?;
        jail.create_file(".persona/config.toml", "[split]\nseed = 1\n")?;
        jail.create_file("override.toml", "[split]\nseed = 2\n")?;

        let config =
            PersonaConfig::load(Some(Path::new("override.toml"))).expect("config should load");
        assert_eq!(config.split.seed, 2);
        Ok(())
    });
}

#[test]
fn invalid_values_load_but_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("override.toml", "[sampling]\nnegative_rate = 0\n")?;

        let config =
            PersonaConfig::load(Some(Path::new("override.toml"))).expect("config should load");
        assert!(config.validate().is_err());
        Ok(())
    });
}
