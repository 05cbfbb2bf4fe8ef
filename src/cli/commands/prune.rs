//! Prune command - prune by age, then prune what was left behind

use super::{render_options, ui_context};
use crate::builder::create_cache;
use crate::cli::args::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::CacheTreeResult;
use crate::render::{render, RenderOptions};
use crate::ui::{self, PruneProgress, UiContext};
use crate::workflow::{self, PruneOutcome};
use serde::Serialize;
use std::sync::Arc;

/// Execute the prune command
pub async fn execute(cli: &Cli, config: &Config) -> CacheTreeResult<()> {
    let cutoff = workflow::require_cutoff(cli.until.as_deref())?;
    let ctx = ui_context(cli, config);

    let progress = PruneProgress::new(&ctx, "Pruning");
    let observer = progress.clone();
    let cache = create_cache(config, cli.builder.as_deref())
        .with_observer(Arc::new(move |line: &str| observer.on_line(line)));

    let result = workflow::prune(&cache, Some(cutoff.as_str()), cli.simulate).await;
    progress.finish();
    let outcome = result?;

    let options = render_options(cli, config, &ctx, "Reclaimed");
    match cli.format {
        OutputFormat::Table => print_table(&ctx, &outcome, &options, cutoff.as_str()),
        OutputFormat::Json => println!("{}", outcome_json(&outcome)?),
        OutputFormat::Plain => print_plain(&outcome),
    }

    Ok(())
}

fn print_table(ctx: &UiContext, outcome: &PruneOutcome, options: &RenderOptions, until: &str) {
    ui::section(ctx, &format!("Removed records unused since {}", until));
    println!("{}", render(&outcome.removed, options));

    if outcome.extra.is_empty() {
        ui::step_ok(ctx, "No records left behind");
        return;
    }

    if outcome.simulated {
        ui::step_warn(
            ctx,
            &format!(
                "{} records left behind (simulated, not removed)",
                outcome.extra.len()
            ),
        );
        for id in &outcome.extra {
            ui::remark(ctx, id);
        }
        return;
    }

    ui::section(
        ctx,
        &format!("Removed {} records left behind", outcome.extra.len()),
    );
    if let Some(ref extra_removed) = outcome.extra_removed {
        println!(
            "{}",
            render(extra_removed, &options.with_label("Reclaimed (extra)"))
        );
    }
}

fn outcome_json(outcome: &PruneOutcome) -> CacheTreeResult<String> {
    #[derive(Serialize)]
    struct PruneJson<'a> {
        removed: Vec<&'a str>,
        reclaimed: &'a str,
        extra: &'a [String],
        extra_removed: Vec<&'a str>,
        extra_reclaimed: Option<&'a str>,
        simulated: bool,
    }

    let json = PruneJson {
        removed: outcome.removed.ids().collect(),
        reclaimed: outcome.removed.total(),
        extra: &outcome.extra,
        extra_removed: outcome
            .extra_removed
            .iter()
            .flat_map(|forest| forest.ids())
            .collect(),
        extra_reclaimed: outcome.extra_removed.as_ref().map(|forest| forest.total()),
        simulated: outcome.simulated,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

fn print_plain(outcome: &PruneOutcome) {
    let extra_removed = outcome.extra_removed.iter().flat_map(|forest| forest.ids());
    for id in outcome.removed.ids().chain(extra_removed) {
        println!("{}", id);
    }
}
