//! Command-line interface definitions for PixelDupe.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, error format) apply to every subcommand.
//!
//! # Example
//!
//! ```bash
//! # Find duplicates inside one directory
//! pixeldupe scan ~/Pictures
//!
//! # Find duplicates within and across two directories, as JSON
//! pixeldupe scan ~/Pictures /mnt/backup/Pictures --output json
//!
//! # Show the fingerprint of individual files
//! pixeldupe hash a.png b.png
//!
//! # Verbose mode for debugging
//! pixeldupe -v scan ~/Pictures
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Perceptual duplicate image finder.
///
/// PixelDupe groups images whose structural hash (pHash) and color
/// distribution hash are both identical.
#[derive(Debug, Parser)]
#[command(name = "pixeldupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for PixelDupe.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan one or two directories for duplicate images
    Scan(ScanArgs),
    /// Print the fingerprint of individual image files
    Hash(HashArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan (files directly inside it, no recursion)
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Optional second directory; duplicates across both are grouped together
    #[arg(value_name = "DIR2")]
    pub second_path: Option<PathBuf>,

    /// Output format (defaults to the configured format, `text` if unset)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Use a worker pool for directories with more than N files
    #[arg(long, value_name = "N")]
    pub threshold: Option<usize>,

    /// Worker pool size (default: number of logical CPUs)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,
}

impl ScanArgs {
    /// The directories to scan, in order.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        std::iter::once(self.path.clone())
            .chain(self.second_path.clone())
            .collect()
    }
}

/// Arguments for the hash subcommand.
#[derive(Debug, Args)]
pub struct HashArgs {
    /// Image files to fingerprint
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
