//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::RecordingSlot;

/// ROM Analyzer - range-of-motion metrics from six-sensor recordings
#[derive(Parser, Debug)]
#[command(
    name = "rom-analyzer",
    author,
    version,
    about = "Range-of-motion analysis for six-sensor motion recordings",
    long_about = "Computes the 24 range-of-motion metrics of a session from its four \n\
                  sensor recordings (flexion, extension, abduction, rotation).\n\n\
                  Recordings are given either as individual files or through a \n\
                  TOML/JSON session file."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ROM_ANALYZER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "ROM_ANALYZER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the four recordings of a session
    Analyze(AnalyzeArgs),

    /// Parse and align a single recording without analyzing it
    Inspect(InspectArgs),

    /// Validate a session file without reading the recordings
    Validate(ValidateArgs),
}

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Session file (TOML or JSON) naming the four recordings
    #[arg(
        short,
        long,
        env = "ROM_ANALYZER_SESSION",
        conflicts_with_all = ["flexion", "extension", "abduction", "rotation"]
    )]
    pub config: Option<PathBuf>,

    /// Recording 1 (flexion)
    #[arg(long, requires_all = ["extension", "abduction", "rotation"])]
    pub flexion: Option<PathBuf>,

    /// Recording 2 (extension)
    #[arg(long)]
    pub extension: Option<PathBuf>,

    /// Recording 3 (abduction / adduction)
    #[arg(long)]
    pub abduction: Option<PathBuf>,

    /// Recording 4 (external / internal rotation)
    #[arg(long)]
    pub rotation: Option<PathBuf>,

    /// Fail when a recording is missing a sensor role instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Decimal places in table output (overrides the session file)
    #[arg(long)]
    pub precision: Option<usize>,

    /// Also print per-metric accumulator statistics
    #[arg(long)]
    pub stats: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ROM_ANALYZER_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `inspect` command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Recording to inspect
    pub file: PathBuf,

    /// Slot the recording belongs to (1-4); selects the categories shown
    #[arg(long, default_value = "1", value_parser = parse_slot)]
    pub slot: RecordingSlot,

    /// Fail when a sensor role is missing instead of warning
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to session file to validate
    #[arg(short, long, default_value = "session.toml")]
    pub config: PathBuf,

    /// Also check that the four recordings exist
    #[arg(long)]
    pub check_inputs: bool,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

fn parse_slot(value: &str) -> Result<RecordingSlot, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a slot number"))?;
    RecordingSlot::ALL
        .into_iter()
        .find(|slot| slot.number() == number)
        .ok_or_else(|| format!("slot must be 1-4, got {number}"))
}
