//! CLI parse: clap types for demo-reset. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Interactively clear the demo collections of a Firebase Realtime Database.
///
/// There are no subcommands. Deletion always requires typing DELETE at the prompt.
#[derive(Parser, Debug)]
#[command(name = "demo-reset")]
#[command(about = "Reset demo data in a Firebase Realtime Database")]
pub struct Cli {
    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database root URL (overrides configuration and environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off); enables logging
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (used when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
