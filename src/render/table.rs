//! Table formatting for laid-out rows

use super::layout::Row;
use super::palette::GroupColor;
use console::truncate_str;

/// Shell preamble BuildKit puts in front of `RUN` step descriptions
const SHELL_PREAMBLE: &str = "mount / from exec /bin/sh -c ";

/// No-op prefix some Dockerfiles chain in front of commands
const NOOP_PREFIX: &str = "true && ";

const INDENT: &str = "  ";
const HEADERS: [&str; 6] = ["ID", "PARENT", "SIZE", "USAGE", "LAST USED", "DESCRIPTION"];

/// Placeholder total when the report had none
pub const EMPTY_TOTAL: &str = "0B";

/// Clean a description for display.
///
/// Collapses whitespace runs, strips known boilerplate, then truncates to
/// `width` characters with an ellipsis. A width of 0 disables truncation.
pub fn clean_description(raw: &str, width: usize) -> String {
    let collapsed = collapse_whitespace(raw);
    let stripped = collapsed.replace(SHELL_PREAMBLE, "").replace(NOOP_PREFIX, "");
    // Stripping mid-text can leave a double space behind
    let cleaned = collapse_whitespace(&stripped);
    if width == 0 {
        return cleaned;
    }
    truncate_str(&cleaned, width, "…").into_owned()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `<label>: <total>` line closing every rendering
pub fn total_line(label: &str, total: &str) -> String {
    let total = if total.is_empty() { EMPTY_TOTAL } else { total };
    format!("{}: {}", label, total)
}

/// Format rows as an aligned table, one line per row plus a header.
pub fn format_rows(rows: &[Row], description_width: usize, colors: bool) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                format!(
                    "{}{}",
                    INDENT.repeat(row.depth),
                    group_text(&row.id, row.id_color, colors)
                ),
                group_text(&row.parent, row.parent_color, colors),
                row.size.clone(),
                row.usage_count.to_string(),
                row.last_used.clone(),
                clean_description(&row.description, description_width),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&join_line(&HEADERS.map(String::from), &widths, [None, None]));
    out.push('\n');

    for (row, line) in rows.iter().zip(cells) {
        let tint = if colors {
            [row.id_color, row.parent_color]
        } else {
            [None, None]
        };
        out.push_str(&join_line(&line, &widths, tint));
        out.push('\n');
    }

    out
}

/// Without colors a group is shown as a `[n]` marker after the cell
fn group_text(cell: &str, color: Option<GroupColor>, colors: bool) -> String {
    match color {
        Some(color) if !colors => format!("{} [{}]", cell, color.index() + 1),
        _ => cell.to_string(),
    }
}

/// Pad every cell but the last to its column width and color the first two
fn join_line(cells: &[String; 6], widths: &[usize; 6], tint: [Option<GroupColor>; 2]) -> String {
    let last = cells.len() - 1;
    let mut parts = Vec::with_capacity(cells.len());

    for (i, cell) in cells.iter().enumerate() {
        let padded = if i == last {
            cell.clone()
        } else {
            format!("{:<width$}", cell, width = widths[i])
        };
        let colored = match tint.get(i).copied().flatten() {
            Some(color) => color.style().force_styling(true).apply_to(padded).to_string(),
            None => padded,
        };
        parts.push(colored);
    }

    parts.join(" ").trim_end().to_string()
}
