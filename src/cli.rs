//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// A multi-source subtitle acquisition and reconciliation pipeline.
#[derive(Parser, Debug)]
#[command(name = "subtitle-pipeline", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "subtitle-pipeline.yaml", env = "CONFIG_PATH", global = true)]
    pub config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands for the subtitle pipeline.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh subtitle candidates for a video and print the assembled list.
    Refresh(RefreshArgs),

    /// List sidecar subtitle files found next to a video.
    Scan {
        /// Path to the video file.
        video: String,
    },

    /// List supported subtitle tracks embedded in a video.
    Probe {
        /// Path to the video file.
        video: String,
    },

    /// Validate the configuration file without running.
    #[command(name = "config-validate")]
    ConfigValidate,

    /// Display the parsed configuration.
    #[command(name = "config-show")]
    ConfigShow,
}

/// Arguments for the refresh subcommand.
#[derive(Args, Debug)]
pub struct RefreshArgs {
    /// Path to the video file.
    pub video: String,

    /// Source types to refresh (local, embedded, online).
    #[arg(short, long, value_delimiter = ',', default_value = "local,embedded")]
    pub types: Vec<String>,

    /// Preferred languages for online search, most preferred first.
    /// Defaults to the configured list.
    #[arg(short, long, value_delimiter = ',')]
    pub languages: Vec<String>,
}
