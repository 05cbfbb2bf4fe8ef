//! A single build cache record

use serde::Serialize;

/// One cache record as reported by the builder.
///
/// `size`, `last_used` and `created_at` are kept as the builder printed
/// them. `created_at` is only ever compared as a string for ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Record identifier, unique within one report
    pub id: String,

    /// Parent record ids in the order listed; may name records outside the report
    pub parents: Vec<String>,

    /// Size as printed (e.g. "12.5MB")
    pub size: String,

    /// Last use as printed
    pub last_used: String,

    /// Creation time as printed
    pub created_at: String,

    /// Number of times the record was used
    pub usage_count: u64,

    /// Free-form description, usually the build step
    pub description: String,

    /// No parent of this entry is present in the same report
    pub is_root: bool,

    /// No entry in the same report lists this one as a parent
    pub is_leaf: bool,
}

impl Entry {
    /// Create an entry with the given id and no other data
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_root: true,
            is_leaf: true,
            ..Self::default()
        }
    }

    /// Builder-style helper to set parents
    #[cfg(test)]
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style helper to set the creation time
    #[cfg(test)]
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Whether `id` is one of this entry's listed parents
    pub fn has_parent(&self, id: &str) -> bool {
        self.parents.iter().any(|p| p == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_root_and_leaf_until_derived() {
        let entry = Entry::new("abc");
        assert_eq!(entry.id, "abc");
        assert!(entry.is_root);
        assert!(entry.is_leaf);
        assert!(entry.parents.is_empty());
    }

    #[test]
    fn has_parent() {
        let entry = Entry::new("c").with_parents(["a", "b"]);
        assert!(entry.has_parent("a"));
        assert!(entry.has_parent("b"));
        assert!(!entry.has_parent("c"));
    }
}
