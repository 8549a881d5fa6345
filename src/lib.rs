//! Subtitle Pipeline - multi-source subtitle acquisition and reconciliation.
//!
//! This library discovers subtitle candidates for a video from local,
//! embedded, and online sources, tracks their asynchronous load state in a
//! shared store, selects which ones are currently usable, and publishes
//! incremental state changes to consumers.

pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod model;
pub mod reconcile;
pub mod source;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::{Cli, Commands, RefreshArgs};
use crate::model::SourceKind;
use crate::reconcile::CollectionWatcher;
use crate::source::embedded::FfprobeExtractor;
use crate::source::local::DirectoryScanner;
use crate::source::{DisabledSearcher, EmbeddedExtractor, LocalScanner};
use crate::store::{JsonPreferenceStore, SubtitleStore};

pub use manager::{LoadedSubtitle, SubtitleEvent, SubtitleManager};

/// Runs the subtitle pipeline with the provided CLI arguments.
pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;

    match cli.command {
        Commands::Refresh(args) => run_refresh(args, &cli.config).await,
        Commands::Scan { video } => run_scan(&video, &cli.config).await,
        Commands::Probe { video } => run_probe(&video, &cli.config).await,
        Commands::ConfigValidate => validate_config(&cli.config).await,
        Commands::ConfigShow => show_config(&cli.config).await,
    }
}

/// Initializes the tracing subscriber for structured logging.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(())
}

/// Maps CLI type names to source kinds, dropping unrecognized names.
fn parse_kinds(types: &[String]) -> Vec<SourceKind> {
    let mut kinds = Vec::new();
    for name in types {
        match name.to_lowercase().as_str() {
            "local" => kinds.push(SourceKind::Local),
            "embedded" => kinds.push(SourceKind::Embedded),
            "online" => kinds.push(SourceKind::Online),
            other => warn!(kind = other, "Unrecognized subtitle type, ignoring"),
        }
    }
    kinds
}

/// Refreshes candidates for one video and prints the assembled list.
async fn run_refresh(args: RefreshArgs, config_path: &Path) -> Result<()> {
    let config = config::load_or_default(config_path)?;
    let kinds = parse_kinds(&args.types);
    let languages = if args.languages.is_empty() {
        config.languages.preferred.clone()
    } else {
        args.languages.clone()
    };

    let store = SubtitleStore::new();
    let (events_tx, mut events_rx) = mpsc::channel(100);

    let manager = Arc::new(SubtitleManager::new(
        store,
        config.sources.clone(),
        Arc::new(DirectoryScanner),
        Arc::new(FfprobeExtractor),
        Arc::new(DisabledSearcher),
        Arc::new(JsonPreferenceStore::new(config.preferences.path.clone())),
        events_tx,
    ));

    // Publish incremental updates for the lifetime of the command.
    tokio::spawn(CollectionWatcher::new(manager.clone()).run());
    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event {
                SubtitleEvent::RefreshFinished { video_id } => {
                    info!(video_id, "Refresh finished");
                }
                SubtitleEvent::SubtitleListUpdated { video_id, entries } => {
                    info!(video_id, count = entries.len(), "Subtitle list updated");
                }
            }
        }
    });

    manager.refresh(&kinds, &args.video, &languages).await?;

    let list = manager.build_list(&args.video).await?;
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

/// Lists sidecar subtitle files found next to the video.
async fn run_scan(video: &str, config_path: &Path) -> Result<()> {
    let config = config::load_or_default(config_path)?;
    let candidates = DirectoryScanner.scan(video, &config.sources.formats).await?;

    if candidates.is_empty() {
        println!("No local subtitles found.");
    } else {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    }
    Ok(())
}

/// Lists supported embedded subtitle tracks in the video.
async fn run_probe(video: &str, config_path: &Path) -> Result<()> {
    let config = config::load_or_default(config_path)?;
    let candidates = FfprobeExtractor
        .extract(video, &config.sources.codecs)
        .await?;

    if candidates.is_empty() {
        println!("No embedded subtitle tracks found.");
    } else {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    }
    Ok(())
}

/// Validates the configuration file and reports any issues.
async fn validate_config(config_path: &Path) -> Result<()> {
    let config = config::load_and_validate(config_path)?;

    println!("Configuration is valid.");
    println!("Supported formats: {}", config.sources.formats.join(", "));
    println!("Supported codecs: {}", config.sources.codecs.join(", "));
    if !config.languages.preferred.is_empty() {
        println!("Preferred languages: {}", config.languages.preferred.join(", "));
    }
    Ok(())
}

/// Displays the parsed configuration.
async fn show_config(config_path: &Path) -> Result<()> {
    let config = config::load_or_default(config_path)?;
    let yaml = serde_yaml::to_string(&config)?;
    println!("{}", yaml);
    Ok(())
}
