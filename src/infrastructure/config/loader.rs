use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".linkfill";

/// Prefix for environment overrides, e.g. `LINKFILL_LLM__MODEL`.
pub const ENV_PREFIX: &str = "LINKFILL_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid confidence_floor: {0}. Must be between 0.0 and 1.0")]
    InvalidConfidenceFloor(f64),

    #[error("Invalid max_auto_rounds: {0}. Must be at least 1")]
    InvalidMaxAutoRounds(u32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid {0} timeout: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("LLM model cannot be empty")]
    EmptyModel,

    #[error("LLM base_url cannot be empty")]
    EmptyBaseUrl,

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .linkfill/config.yaml (project config)
    /// 3. .linkfill/local.yaml (local overrides, optional)
    /// 4. Environment variables (LINKFILL_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(&figment).context("Failed to extract configuration from figment")
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::extract(&figment)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn extract(figment: &Figment) -> Result<Config> {
        let config: Config = figment.extract()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let floor = config.resolver.confidence_floor;
        if !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::InvalidConfidenceFloor(floor));
        }

        if config.resolver.max_auto_rounds == 0 {
            return Err(ConfigError::InvalidMaxAutoRounds(0));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.llm.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.llm.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("llm"));
        }

        if config.verifier.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("verifier"));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}
