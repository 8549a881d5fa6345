//! Configuration data structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure containing all settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Source adapter settings.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Language settings.
    #[serde(default)]
    pub languages: LanguageConfig,

    /// Language-preference persistence settings.
    #[serde(default)]
    pub preferences: PreferenceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            sources: SourcesConfig::default(),
            languages: LanguageConfig::default(),
            preferences: PreferenceConfig::default(),
        }
    }
}

/// Settings passed through opaquely to the source adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Sidecar file formats the loader can parse.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Embedded track codecs the loader can parse.
    #[serde(default = "default_codecs")]
    pub codecs: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            codecs: default_codecs(),
        }
    }
}

/// Language settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Preferred languages for online search, most preferred first. Used
    /// when the caller supplies none.
    #[serde(default)]
    pub preferred: Vec<String>,
}

/// Language-preference persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceConfig {
    /// Path of the JSON preference file.
    #[serde(default = "default_preference_path")]
    pub path: PathBuf,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            path: default_preference_path(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_formats() -> Vec<String> {
    ["srt", "ass", "ssa", "vtt", "sub"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_codecs() -> Vec<String> {
    ["subrip", "ass", "ssa", "webvtt", "mov_text"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_preference_path() -> PathBuf {
    PathBuf::from("subtitle-preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_full_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.log_level, "info");
        assert!(config.sources.formats.contains(&"srt".to_string()));
        assert!(config.sources.codecs.contains(&"subrip".to_string()));
        assert!(config.languages.preferred.is_empty());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config: AppConfig = serde_yaml::from_str(
            "sources:\n  formats: [srt]\nlanguages:\n  preferred: [zh-CN, en]\n",
        )
        .unwrap();
        assert_eq!(config.sources.formats, vec!["srt"]);
        assert_eq!(config.languages.preferred, vec!["zh-CN", "en"]);
        // Codecs keep their default when only formats are overridden.
        assert!(!config.sources.codecs.is_empty());
    }
}
