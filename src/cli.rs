use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for mobile-triage.
///
/// Everything except the scan root can also be set in the YAML configuration;
/// flags given here take precedence.
#[derive(Parser, Debug)]
#[clap(
    name = "mobile-triage",
    about = "Classify mobile forensic zip extractions as Android or Apple",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    /// Directory tree to search for zip archives (default: configured root)
    pub root: Option<PathBuf>,

    /// Path to configuration YAML file (created with defaults if missing)
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Number of worker threads (default: one per CPU)
    #[clap(short, long)]
    pub workers: Option<usize>,

    /// Ignore the cached path list and walk the tree again
    #[clap(long)]
    pub rescan: bool,

    /// Results file (default: results.json)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "triage.yaml")]
        path: PathBuf,
    },
}
