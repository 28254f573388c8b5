//! Command-line argument definitions for the emission zone converter
//!
//! This module defines the CLI interface using the clap derive API. Options
//! shared by every command live in [`CommonArgs`] and are flattened into
//! each subcommand.

use crate::app::models::{ZoneStatus, ZoneType};
use crate::config::LabelMode;
use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, MAX_WORKERS};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments for the emission zone converter
///
/// Converts the Dutch urban vehicle access regulation XML feed into emission
/// zone records suitable for rendering on a map.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "emission-zones",
    version,
    about = "Convert emission zone XML feeds into map-ready zone records",
    long_about = "Reads urban vehicle access regulation (UVAR) XML documents from files, \
                  directories, glob patterns or URLs and converts them into emission zone \
                  records with normalized polygon geometry, zone type, lifecycle status and \
                  restriction/exemption labels."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert feed documents into a JSON array of zones
    Convert(ConvertArgs),
    /// List zones with optional filtering and summary counts
    List(ListArgs),
}

/// Options shared by all commands
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Feed documents: files, directories, glob patterns or http(s) URLs
    ///
    /// If none are given, reads emission-zones.xml from the user data
    /// directory (for example ~/.local/share/emission-zones/).
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Path to a JSON configuration file
    ///
    /// Any subset of the transformation settings may be given; missing
    /// fields keep their defaults. Command-line flags override the file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Preferred language for names and authorities
    #[arg(long = "lang", value_name = "TAG", help = "Preferred language tag (default: nl)")]
    pub language: Option<String>,

    /// Source of restriction and exemption labels
    #[arg(long = "labels", value_enum, help = "Restriction/exemption label source")]
    pub labels: Option<LabelModeArg>,

    /// Emit one zone per polygon instead of multi-polygon zones
    #[arg(
        long = "split-polygons",
        help = "Emit each polygon of a multi-polygon zone as a separate numbered zone"
    )]
    pub split_polygons: bool,

    /// Continue past documents that cannot be fetched or parsed
    #[arg(
        long = "keep-going",
        help = "Emit zones from the remaining documents when some documents fail"
    )]
    pub keep_going: bool,

    /// HTTP timeout for remote documents, in seconds
    #[arg(
        long = "timeout",
        value_name = "SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS,
        help = "HTTP timeout in seconds for remote documents"
    )]
    pub timeout_secs: u64,

    /// Number of documents processed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        default_value_t = default_workers(),
        help = "Number of documents processed concurrently"
    )]
    pub workers: usize,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output file for the zone array
    ///
    /// If not specified, writes to stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Output JSON file")]
    pub output_file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty", help = "Pretty-print the JSON output")]
    pub pretty: bool,
}

/// Arguments for the list command
#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list zones of this type
    #[arg(long = "type", value_enum, help = "Filter by zone type")]
    pub zone_type: Option<ZoneTypeArg>,

    /// Only list zones with this status
    #[arg(long = "status", value_enum, help = "Filter by zone status")]
    pub status: Option<StatusArg>,

    /// Only list zones whose name or city contains this text
    #[arg(long = "search", value_name = "TEXT", help = "Case-insensitive search in name and city")]
    pub search: Option<String>,

    /// Output format for the listing
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the listing"
    )]
    pub output_format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Label mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelModeArg {
    /// Fixed descriptive labels
    Fixed,
    /// Labels decoded from vehicle characteristics
    Decoded,
}

impl From<LabelModeArg> for LabelMode {
    fn from(arg: LabelModeArg) -> Self {
        match arg {
            LabelModeArg::Fixed => LabelMode::Fixed,
            LabelModeArg::Decoded => LabelMode::Decoded,
        }
    }
}

/// Zone type as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZoneTypeArg {
    /// Zero-emission zones
    Ze,
    /// Low-emission zones
    Lez,
}

impl From<ZoneTypeArg> for ZoneType {
    fn from(arg: ZoneTypeArg) -> Self {
        match arg {
            ZoneTypeArg::Ze => ZoneType::ZeroEmission,
            ZoneTypeArg::Lez => ZoneType::LowEmission,
        }
    }
}

/// Zone status as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Upcoming,
    Inactive,
}

impl From<StatusArg> for ZoneStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => ZoneStatus::Active,
            StatusArg::Upcoming => ZoneStatus::Upcoming,
            StatusArg::Inactive => ZoneStatus::Inactive,
        }
    }
}

/// Default worker count: one per CPU, capped
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

impl Args {
    /// Get the command, failing when none was given
    pub fn get_command(&self) -> Result<Commands> {
        self.command
            .clone()
            .ok_or_else(|| Error::configuration("No command specified"))
    }
}

impl CommonArgs {
    /// Validate the shared arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_WORKERS
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration("Timeout must be greater than 0 seconds"));
        }

        if let Some(language) = &self.language {
            if language.trim().is_empty() {
                return Err(Error::configuration("Language tag cannot be empty"));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress and summaries (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            config_file: None,
            language: None,
            labels: None,
            split_polygons: false,
            keep_going: false,
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            workers: default_workers(),
            verbose: 0,
            quiet: false,
        }
    }
}
