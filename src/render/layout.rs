//! Depth-first layout of the forest into table rows
//!
//! A record with several parents appears once under each of them. The
//! palette tags records with several parents (id column) and the children
//! of records with several children (parent column) so the fan-in and
//! fan-out can be followed without a graph view.

use super::palette::{GroupColor, Palette};
use crate::forest::{ChildIndex, Entry, Forest};
use std::collections::{HashMap, HashSet};

/// Placeholder shown when a record has no parent at all
pub const NO_PARENT: &str = "-";

/// One line of the forest table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Nesting level, 0 for roots
    pub depth: usize,
    pub id: String,
    pub id_color: Option<GroupColor>,
    /// Parent shown for this occurrence of the record
    pub parent: String,
    pub parent_color: Option<GroupColor>,
    pub size: String,
    pub usage_count: u64,
    pub last_used: String,
    pub description: String,
}

/// Lay out `forest` depth-first from its roots.
pub fn layout(forest: &Forest, palette: &mut Palette) -> Vec<Row> {
    let mut walker = Walker {
        forest,
        children: forest.children(),
        palette,
        id_colors: HashMap::new(),
        on_path: HashSet::new(),
        rows: Vec::new(),
    };

    for root in forest.roots() {
        walker.visit(root, None, None, 0);
    }

    walker.rows
}

/// Parent to display for `entry` when reached from `via`.
///
/// The traversal parent if the entry lists it, else the first listed
/// parent, else [`NO_PARENT`].
pub fn display_parent<'a>(entry: &'a Entry, via: Option<&'a str>) -> &'a str {
    match via {
        Some(parent) if entry.has_parent(parent) => parent,
        _ => entry
            .parents
            .first()
            .map(String::as_str)
            .unwrap_or(NO_PARENT),
    }
}

struct Walker<'a, 'p> {
    forest: &'a Forest,
    children: ChildIndex<'a>,
    palette: &'p mut Palette,
    /// Color per multi-parent record, fixed on first appearance
    id_colors: HashMap<&'a str, GroupColor>,
    /// Records on the current path; guards against cyclic input
    on_path: HashSet<&'a str>,
    rows: Vec<Row>,
}

impl<'a> Walker<'a, '_> {
    fn visit(
        &mut self,
        entry: &'a Entry,
        via: Option<&'a str>,
        parent_color: Option<GroupColor>,
        depth: usize,
    ) {
        let id = entry.id.as_str();
        if !self.on_path.insert(id) {
            return;
        }

        let id_color = if entry.parents.len() > 1 {
            let palette = &mut *self.palette;
            Some(*self.id_colors.entry(id).or_insert_with(|| palette.next_color()))
        } else {
            None
        };

        self.rows.push(Row {
            depth,
            id: entry.id.clone(),
            id_color,
            parent: display_parent(entry, via).to_string(),
            parent_color,
            size: entry.size.clone(),
            usage_count: entry.usage_count,
            last_used: entry.last_used.clone(),
            description: entry.description.clone(),
        });

        let kids: Vec<&'a str> = self.children.of(id).to_vec();
        let sibling_color = if kids.len() > 1 {
            Some(self.palette.next_color())
        } else {
            None
        };

        for kid in kids {
            if let Some(child) = self.forest.get(kid) {
                self.visit(child, Some(id), sibling_color, depth + 1);
            }
        }

        self.on_path.remove(id);
    }
}
