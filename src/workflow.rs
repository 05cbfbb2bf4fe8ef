//! View and prune workflows
//!
//! The prune workflow runs strictly in order: snapshot the cache, prune by
//! age, work out what that prune left behind, and prune those records by id.
//! Each step consumes the previous step's output, and the first failure ends
//! the run.

use crate::builder::{BuildCache, Cutoff};
use crate::error::{CacheTreeError, CacheTreeResult};
use crate::forest::Forest;
use crate::prune::extra_prunable;
use crate::report;
use tracing::{debug, info};

/// Everything a prune run produced
#[derive(Debug)]
pub struct PruneOutcome {
    /// Cache graph before anything was removed
    pub before: Forest,

    /// Records removed by the age-based prune
    pub removed: Forest,

    /// Ids found safe to remove on top of `removed`
    pub extra: Vec<String>,

    /// Records removed by the follow-up prune, when one ran
    pub extra_removed: Option<Forest>,

    /// The follow-up prune only simulated removal
    pub simulated: bool,
}

/// Validate the cutoff for prune mode.
///
/// Runs before any collaborator call.
pub fn require_cutoff(until: Option<&str>) -> CacheTreeResult<Cutoff> {
    let until = until.ok_or_else(|| CacheTreeError::MissingRequiredOption {
        option: "--until".to_string(),
        mode: "prune".to_string(),
    })?;
    until.parse()
}

/// Read and parse the full cache inventory
pub async fn inventory(cache: &dyn BuildCache) -> CacheTreeResult<Forest> {
    let text = cache.inventory().await?;
    let forest = report::parse(&text)?;
    debug!(
        "Inventory of {}: {} records, total {:?}",
        cache.name(),
        forest.len(),
        forest.total()
    );
    Ok(forest)
}

/// Prune by age, then prune what the age-based prune left orphaned
pub async fn prune(
    cache: &dyn BuildCache,
    until: Option<&str>,
    simulate: bool,
) -> CacheTreeResult<PruneOutcome> {
    let cutoff = require_cutoff(until)?;

    let before = inventory(cache).await?;

    let removed = report::parse(&cache.prune_until(&cutoff).await?)?;
    info!("Age-based prune removed {} records", removed.len());

    let removed_ids: Vec<String> = removed.ids().map(String::from).collect();
    let extra = extra_prunable(&before, &removed_ids);

    let extra_removed = if extra.is_empty() {
        debug!("No extra records to prune");
        None
    } else {
        info!("Pruning {} records left behind", extra.len());
        let text = cache.prune_ids(&extra, simulate).await?;
        Some(report::parse(&text)?)
    };

    Ok(PruneOutcome {
        before,
        removed,
        extra,
        extra_removed,
        simulated: simulate,
    })
}
