//! View command - show the build cache as a forest

use super::{print_forest, render_options, ui_context};
use crate::builder::{create_cache, BuildCache};
use crate::cli::args::Cli;
use crate::config::Config;
use crate::error::CacheTreeResult;
use crate::ui::TaskSpinner;
use crate::workflow;

/// Execute the view command
pub async fn execute(cli: &Cli, config: &Config) -> CacheTreeResult<()> {
    let ctx = ui_context(cli, config);
    let cache = create_cache(config, cli.builder.as_deref());

    let mut spinner = TaskSpinner::new(&ctx);
    spinner.start(&format!("Reading build cache of {}", cache.name()));

    let forest = match workflow::inventory(&cache).await {
        Ok(forest) => {
            spinner.stop(&format!("{} cache records", forest.len()));
            forest
        }
        Err(e) => {
            spinner.stop_error("Failed to read build cache");
            return Err(e);
        }
    };

    let options = render_options(cli, config, &ctx, "Total");
    print_forest(&forest, &options, cli.format)
}
