//! Parser for `Key: value` cache reports
//!
//! Reports are blocks of `Key: value` lines. A blank or otherwise
//! non-matching line closes the current block, and `Total: <value>` ends the
//! report. Keys are matched case-insensitively; unknown keys are skipped.

use crate::error::{CacheTreeError, CacheTreeResult};
use crate::forest::{Entry, Forest};
use tracing::debug;

/// Fields recognized in a record block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Parent,
    Size,
    LastUsed,
    CreatedAt,
    UsageCount,
    Description,
    Total,
}

impl Field {
    /// Map a lowercased key to a field
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Self::Id),
            "parent" | "parents" => Some(Self::Parent),
            "size" => Some(Self::Size),
            "last used" => Some(Self::LastUsed),
            "created at" => Some(Self::CreatedAt),
            "usage count" => Some(Self::UsageCount),
            "description" => Some(Self::Description),
            "total" => Some(Self::Total),
            _ => None,
        }
    }
}

/// Parse a full report into a forest.
///
/// Fails only when a typed field (the usage count) does not parse.
pub fn parse(text: &str) -> CacheTreeResult<Forest> {
    let mut entries = Vec::new();
    let mut current = Entry::new("");
    let mut total = String::new();

    for (index, line) in text.lines().enumerate() {
        let Some((key, value)) = split_record_line(line) else {
            flush(&mut current, &mut entries);
            continue;
        };

        let Some(field) = Field::from_key(&key) else {
            continue;
        };

        match field {
            Field::Id => current.id = value.to_string(),
            Field::Parent => current.parents = split_parents(value),
            Field::Size => current.size = value.to_string(),
            Field::LastUsed => current.last_used = value.to_string(),
            Field::CreatedAt => current.created_at = value.to_string(),
            Field::UsageCount => {
                current.usage_count = value
                    .parse()
                    .map_err(|e| CacheTreeError::malformed(index + 1, key.as_str(), value, e))?;
            }
            Field::Description => current.description = value.to_string(),
            Field::Total => {
                total = value.to_string();
                break;
            }
        }
    }

    flush(&mut current, &mut entries);

    debug!("Parsed {} records, total {:?}", entries.len(), total);
    Ok(Forest::new(entries, total))
}

/// Move the accumulated record into `entries` if it has an id
fn flush(current: &mut Entry, entries: &mut Vec<Entry>) {
    let record = std::mem::replace(current, Entry::new(""));
    if !record.id.is_empty() {
        entries.push(record);
    }
}

/// Split `Key: value` into a lowercased key and trimmed value.
///
/// The key must be non-empty and made of letters, digits, spaces, `_` or `-`.
fn split_record_line(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == ' ' || c == '_' || c == '-')
    {
        return None;
    }
    Some((key.to_lowercase(), value.trim()))
}

/// Comma-separated parent ids; empty segments mean "no parent"
fn split_parents(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
