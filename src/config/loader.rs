//! Configuration file loading and parsing.

use std::path::Path;

use anyhow::{Context, Result};

use super::model::AppConfig;
use crate::error::ConfigError;

/// Loads the configuration file from disk and parses it.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: AppConfig =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(config)
}

/// Loads and fully validates the configuration file.
pub fn load_and_validate(path: &Path) -> Result<AppConfig> {
    let config = load_from_path(path).context("Failed to load configuration")?;

    let errors = validate(&config);
    if !errors.is_empty() {
        for message in &errors {
            tracing::error!(%message, "Config validation error");
        }
        anyhow::bail!(ConfigError::ValidationFailed {
            error_count: errors.len()
        });
    }

    Ok(config)
}

/// Loads the configuration, falling back to defaults if the file does not
/// exist.
pub fn load_or_default(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        load_and_validate(path)
    } else {
        tracing::warn!(?path, "Config file not found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Checks the configuration for unusable values.
fn validate(config: &AppConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.sources.formats.is_empty() {
        errors.push("sources.formats must not be empty".to_string());
    }
    if config.sources.codecs.is_empty() {
        errors.push("sources.codecs must not be empty".to_string());
    }
    for language in &config.languages.preferred {
        if language.trim().is_empty() {
            errors.push("languages.preferred contains an empty entry".to_string());
        }
    }

    errors
}
