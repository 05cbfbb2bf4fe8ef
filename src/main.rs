//! cachetree - build cache forest viewer and pruner
//!
//! CLI entry point that dispatches to the view and prune commands.

use cachetree::cli::{Action, Cli};
use cachetree::config::{Config, ConfigManager};
use cachetree::error::CacheTreeResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CacheTreeResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    match cli.action {
        Action::View => cachetree::cli::commands::view(&cli, &config).await,
        Action::Prune => cachetree::cli::commands::prune(&cli, &config).await,
    }
}

/// 0 = warn, 1 = info, 2+ = debug; logs go to stderr
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("cachetree=warn"),
        1 => EnvFilter::new("cachetree=info"),
        _ => EnvFilter::new("cachetree=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.json_logs() {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
