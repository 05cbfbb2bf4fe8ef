//! Extra prune candidates after an age-based prune
//!
//! Pruning by age can remove a record and still leave the chain of
//! ancestors it was the only user of. Given the graph before pruning and the
//! ids that were actually removed, [`extra_prunable`] finds the ancestors no
//! surviving leaf depends on.

use crate::forest::Forest;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Ids that can be removed in addition to `removed`.
///
/// Steps, in this order:
/// 1. seed candidates with `removed`
/// 2. add every ancestor of a candidate (unknown ids end their branch)
/// 3. drop every id on the ancestor chain of a leaf that was not removed
/// 4. drop `removed` itself
///
/// Protection runs after expansion so a shared ancestor reachable from both
/// a removed record and a live leaf is always kept. The result is in
/// discovery order.
pub fn extra_prunable(before: &Forest, removed: &[String]) -> Vec<String> {
    if removed.is_empty() {
        return Vec::new();
    }

    let removed_set: HashSet<&str> = removed.iter().map(String::as_str).collect();

    let candidates = ascend(before, removed.iter().map(String::as_str));

    let live_leaves = before
        .leaves()
        .map(|leaf| leaf.id.as_str())
        .filter(|id| !removed_set.contains(id));
    let protected: HashSet<&str> = ascend(before, live_leaves).into_iter().collect();

    debug!(
        "Prune analysis: {} removed, {} candidates, {} protected",
        removed_set.len(),
        candidates.len(),
        protected.len()
    );

    candidates
        .into_iter()
        .filter(|id| !protected.contains(id) && !removed_set.contains(id))
        .map(String::from)
        .collect()
}

/// Breadth-first walk from `seeds` through parent links.
///
/// Returns every visited id once, seeds included, in discovery order. Parent
/// ids that are not entries are visited but not expanded.
fn ascend<'a>(forest: &'a Forest, seeds: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut visited = Vec::new();
    let mut queue = VecDeque::new();

    for id in seeds {
        if seen.insert(id) {
            visited.push(id);
            queue.push_back(id);
        }
    }

    while let Some(id) = queue.pop_front() {
        let Some(entry) = forest.get(id) else {
            continue;
        };
        for parent in &entry.parents {
            if seen.insert(parent.as_str()) {
                visited.push(parent.as_str());
                queue.push_back(parent.as_str());
            }
        }
    }

    visited
}
