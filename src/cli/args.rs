//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// cachetree - build cache forest viewer and pruner
///
/// Shows the BuildKit build cache as a forest of layers and prunes it by
/// age, then removes the ancestor chains the age-based prune left behind.
#[derive(Parser, Debug)]
#[command(name = "cachetree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// What to do
    #[arg(value_enum)]
    pub action: Action,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "CACHETREE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Builder to inspect (defaults to the current builder)
    #[arg(short, long)]
    pub builder: Option<String>,

    /// Description column width (0 = unlimited)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Prune records unused since: Unix timestamp, date, or duration (e.g. 72h)
    #[arg(short, long)]
    pub until: Option<String>,

    /// Print only the total line
    #[arg(long)]
    pub total_only: bool,

    /// Report extra records the age-based prune left behind without removing them
    #[arg(long)]
    pub simulate: bool,

    /// Disable colored groups
    #[arg(long)]
    pub no_color: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Available actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Show the build cache as a forest
    View,
    /// Prune by age, then prune what was left orphaned
    Prune,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented forest table
    Table,
    /// JSON output
    Json,
    /// Simple text (one id per line)
    Plain,
}
