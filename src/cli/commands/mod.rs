//! CLI command implementations

pub mod prune;
pub mod view;

pub use prune::execute as prune;
pub use view::execute as view;

use crate::cli::args::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::CacheTreeResult;
use crate::forest::{Entry, Forest};
use crate::render::{render, RenderOptions};
use crate::ui::UiContext;
use serde::Serialize;

/// UI context honoring `--no-color` and the display config
fn ui_context(cli: &Cli, config: &Config) -> UiContext {
    UiContext::detect().with_colors(!cli.no_color && config.display.colors)
}

/// Render options from flags, falling back to config
fn render_options(cli: &Cli, config: &Config, ctx: &UiContext, label: &str) -> RenderOptions {
    RenderOptions {
        description_width: cli.width.unwrap_or(config.display.description_width),
        total_only: cli.total_only,
        total_label: label.to_string(),
        colors: ctx.use_colors(),
    }
}

/// Print one forest in the requested format
fn print_forest(forest: &Forest, options: &RenderOptions, format: OutputFormat) -> CacheTreeResult<()> {
    match format {
        OutputFormat::Table => println!("{}", render(forest, options)),
        OutputFormat::Json => println!("{}", forest_json(forest)?),
        OutputFormat::Plain => print_ids(forest),
    }
    Ok(())
}

fn forest_json(forest: &Forest) -> CacheTreeResult<String> {
    #[derive(Serialize)]
    struct ForestJson<'a> {
        entries: Vec<&'a Entry>,
        total: &'a str,
    }

    let json = ForestJson {
        entries: forest.iter().collect(),
        total: forest.total(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

fn print_ids(forest: &Forest) {
    for id in forest.ids() {
        println!("{}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::parse;
    use clap::Parser;

    #[test]
    fn render_options_prefer_flags() {
        let config = Config::default();
        let ctx = UiContext::non_interactive();

        let cli = Cli::parse_from(["cachetree", "view"]);
        let options = render_options(&cli, &config, &ctx, "Total");
        assert_eq!(options.description_width, config.display.description_width);
        assert!(!options.colors);

        let cli = Cli::parse_from(["cachetree", "view", "--width", "0", "--total-only"]);
        let options = render_options(&cli, &config, &ctx, "Reclaimed");
        assert_eq!(options.description_width, 0);
        assert!(options.total_only);
        assert_eq!(options.total_label, "Reclaimed");
    }

    #[test]
    fn forest_json_lists_entries_in_order() {
        let forest = parse("ID: b\nCreated at: 2\n\nID: a\nCreated at: 1\nParent: b\n\nTotal: 5MB\n").unwrap();
        let json: serde_json::Value = serde_json::from_str(&forest_json(&forest).unwrap()).unwrap();
        assert_eq!(json["total"], "5MB");
        assert_eq!(json["entries"][0]["id"], "a");
        assert_eq!(json["entries"][1]["id"], "b");
        assert_eq!(json["entries"][1]["is_leaf"], false);
    }
}
