use anyhow::Context;
use persona_config::PersonaConfig;
use persona_match::resolve_selection;

use crate::cli::GlobalFlags;

/// Load `.env`, layer every configuration source, and reject invalid values
/// before any stage runs.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PersonaConfig> {
    load_dotenv()?;

    let config = PersonaConfig::load(flags.config.as_deref()).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    resolve_selection(&config.features.names).context("invalid configuration")?;

    tracing::debug!(
        negative_rate = config.sampling.negative_rate,
        train_ratio = config.split.train_ratio,
        n_estimators = config.classifier.n_estimators,
        "configuration loaded"
    );
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
