//! Forest of cache entries keyed by id
//!
//! Entries are stored once, ordered by `created_at` (ties keep first-seen
//! order). Root and leaf flags are derived only after the whole entry set is
//! known.

use super::entry::Entry;
use std::collections::HashMap;
use tracing::debug;

/// All entries of one report plus its total line
#[derive(Debug, Clone, Default)]
pub struct Forest {
    entries: HashMap<String, Entry>,
    order: Vec<String>,
    total: String,
}

impl Forest {
    /// Build a forest from parsed entries.
    ///
    /// A later entry with an id already seen replaces the earlier one.
    pub fn new(entries: impl IntoIterator<Item = Entry>, total: impl Into<String>) -> Self {
        let mut map: HashMap<String, Entry> = HashMap::new();
        let mut order = Vec::new();

        for entry in entries {
            if !map.contains_key(&entry.id) {
                order.push(entry.id.clone());
            }
            map.insert(entry.id.clone(), entry);
        }

        // Stable: equal timestamps keep first-seen order
        order.sort_by(|a, b| map[a].created_at.cmp(&map[b].created_at));

        derive_flags(&mut map);

        debug!("Built forest with {} entries", order.len());

        Self {
            entries: map,
            order,
            total: total.into(),
        }
    }

    /// Total line value as reported, empty when absent
    pub fn total(&self) -> &str {
        &self.total
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in ascending `created_at` order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.order.iter().map(|id| &self.entries[id])
    }

    /// Ids in ascending `created_at` order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Entry> {
        self.iter().filter(|e| e.is_root)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Entry> {
        self.iter().filter(|e| e.is_leaf)
    }

    /// Build the parent -> children adjacency for this forest
    pub fn children(&self) -> ChildIndex<'_> {
        ChildIndex::build(self)
    }
}

/// Recompute `is_root` / `is_leaf` from parent links.
///
/// Only edges whose parent is a known entry count. Running it twice yields
/// the same flags.
fn derive_flags(entries: &mut HashMap<String, Entry>) {
    let mut edges: Vec<(String, String)> = Vec::new();
    for entry in entries.values() {
        for parent in &entry.parents {
            if entries.contains_key(parent) {
                edges.push((entry.id.clone(), parent.clone()));
            }
        }
    }

    for entry in entries.values_mut() {
        entry.is_root = true;
        entry.is_leaf = true;
    }

    for (child, parent) in edges {
        if let Some(entry) = entries.get_mut(&child) {
            entry.is_root = false;
        }
        if let Some(entry) = entries.get_mut(&parent) {
            entry.is_leaf = false;
        }
    }
}

/// Parent id -> child ids, built once from parent pointers.
///
/// Children are listed in the forest's `created_at` order.
#[derive(Debug, Default)]
pub struct ChildIndex<'a> {
    children: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> ChildIndex<'a> {
    fn build(forest: &'a Forest) -> Self {
        let mut children: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for entry in forest.iter() {
            for parent in &entry.parents {
                if !forest.contains(parent) {
                    continue;
                }
                let kids = children.entry(parent.as_str()).or_default();
                if !kids.contains(&entry.id.as_str()) {
                    kids.push(entry.id.as_str());
                }
            }
        }
        Self { children }
    }

    /// Children of `id`, empty when it has none
    pub fn of(&self, id: &str) -> &[&'a str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, parents: &[&str], created: &str) -> Entry {
        Entry::new(id)
            .with_parents(parents.iter().copied())
            .with_created_at(created)
    }

    fn diamond() -> Forest {
        Forest::new(
            vec![
                entry("D", &["B", "C"], "4"),
                entry("B", &["A"], "2"),
                entry("A", &[], "1"),
                entry("C", &["A"], "3"),
            ],
            "1GB",
        )
    }

    #[test]
    fn orders_by_created_at() {
        let forest = diamond();
        let ids: Vec<&str> = forest.ids().collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        assert_eq!(forest.total(), "1GB");
    }

    #[test]
    fn equal_created_at_keeps_first_seen_order() {
        let forest = Forest::new(
            vec![entry("z", &[], "1"), entry("a", &[], "1"), entry("m", &[], "0")],
            "",
        );
        let ids: Vec<&str> = forest.ids().collect();
        assert_eq!(ids, vec!["m", "z", "a"]);
    }

    #[test]
    fn derives_roots_and_leaves() {
        let forest = diamond();
        let roots: Vec<&str> = forest.roots().map(|e| e.id.as_str()).collect();
        let leaves: Vec<&str> = forest.leaves().map(|e| e.id.as_str()).collect();
        assert_eq!(roots, vec!["A"]);
        assert_eq!(leaves, vec!["D"]);
        assert!(!forest.get("B").unwrap().is_root);
        assert!(!forest.get("B").unwrap().is_leaf);
    }

    #[test]
    fn root_and_leaf_follow_known_edges_only() {
        // Every entry with no known-parent edge is a root, every entry never
        // named as a parent is a leaf.
        let forest = Forest::new(
            vec![
                entry("a", &[], "1"),
                entry("b", &["a"], "2"),
                entry("c", &["a", "b"], "3"),
                entry("d", &["external"], "4"),
                entry("e", &["d", "gone"], "5"),
            ],
            "",
        );
        for e in forest.iter() {
            let has_known_parent = e.parents.iter().any(|p| forest.contains(p));
            let named_as_parent = forest.iter().any(|other| other.has_parent(&e.id));
            assert_eq!(e.is_root, !has_known_parent, "root flag of {}", e.id);
            assert_eq!(e.is_leaf, !named_as_parent, "leaf flag of {}", e.id);
        }
    }

    #[test]
    fn unknown_parent_is_still_root() {
        let forest = Forest::new(vec![entry("x", &["missing"], "1")], "");
        let x = forest.get("x").unwrap();
        assert!(x.is_root);
        assert!(x.is_leaf);
    }

    #[test]
    fn derivation_is_idempotent() {
        let forest = diamond();
        let mut entries = forest.entries.clone();
        derive_flags(&mut entries);
        derive_flags(&mut entries);
        for (id, e) in &entries {
            assert_eq!(e.is_root, forest.get(id).unwrap().is_root);
            assert_eq!(e.is_leaf, forest.get(id).unwrap().is_leaf);
        }
    }

    #[test]
    fn duplicate_id_overwrites_earlier_entry() {
        let forest = Forest::new(
            vec![entry("a", &[], "1"), entry("a", &["p"], "2")],
            "",
        );
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.get("a").unwrap().parents, vec!["p"]);
    }

    #[test]
    fn child_index_lists_known_children_in_order() {
        let forest = diamond();
        let children = forest.children();
        assert_eq!(children.of("A"), &["B", "C"]);
        assert_eq!(children.of("B"), &["D"]);
        assert_eq!(children.of("C"), &["D"]);
        assert!(children.of("D").is_empty());
        assert!(children.of("unknown").is_empty());
    }

    #[test]
    fn empty_forest() {
        let forest = Forest::default();
        assert!(forest.is_empty());
        assert_eq!(forest.total(), "");
        assert_eq!(forest.roots().count(), 0);
    }
}
