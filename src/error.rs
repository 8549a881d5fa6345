//! Error types for the subtitle pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manager error: {0}")]
    Manager(#[from] ManagerError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Preference store error: {0}")]
    Preference(#[from] PreferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and parsing errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("Config validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },
}

/// Errors surfaced by the subtitle manager itself.
///
/// Individual source failures are not represented here; they are degraded to
/// empty result sets inside `refresh` and never reach its caller.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// The caller asked for a refresh without any recognized source kind.
    #[error("No valid subtitle type provided.")]
    NoValidType,

    /// A normalization lookup found no raw candidate instance for the id.
    #[error("No subtitle instance found for '{id}'")]
    InstanceNotFound { id: String },

    /// A normalization lookup found no shared record for the id.
    #[error("No subtitle record found for '{id}'")]
    RecordNotFound { id: String },
}

/// Failures reported by an individual source adapter.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Subtitle source '{name}' unavailable: {message}")]
    Unavailable { name: String, message: String },

    #[error("Process spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Failed to parse source output: {0}")]
    ParseFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Language-preference persistence errors.
#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to read preference file '{path}': {message}")]
    ReadFailed { path: PathBuf, message: String },

    #[error("Failed to write preference file '{path}': {message}")]
    WriteFailed { path: PathBuf, message: String },

    #[error("Failed to serialize preferences: {0}")]
    SerializationFailed(String),
}
