//! Forest rendering
//!
//! Turns a [`Forest`] into an indented table followed by a total line.

mod layout;
mod palette;
mod table;

pub use layout::{display_parent, layout, Row, NO_PARENT};
pub use palette::{GroupColor, Palette};
pub use table::{clean_description, format_rows, total_line, EMPTY_TOTAL};

use crate::forest::Forest;

/// Options controlling a single rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum description width, 0 for no limit
    pub description_width: usize,

    /// Print only the total line
    pub total_only: bool,

    /// Label in front of the total value
    pub total_label: String,

    /// Emit terminal colors for groups
    pub colors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            description_width: 60,
            total_only: false,
            total_label: "Total".to_string(),
            colors: false,
        }
    }
}

impl RenderOptions {
    /// Same options with a different total label
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            total_label: label.into(),
            ..self.clone()
        }
    }
}

/// Render with a fresh palette
pub fn render(forest: &Forest, options: &RenderOptions) -> String {
    render_with(forest, options, &mut Palette::new())
}

/// Render using the given palette for color groups
pub fn render_with(forest: &Forest, options: &RenderOptions, palette: &mut Palette) -> String {
    let total = total_line(&options.total_label, forest.total());
    if options.total_only || forest.is_empty() {
        return total;
    }

    let rows = layout(forest, palette);
    let mut out = format_rows(&rows, options.description_width, options.colors);
    out.push_str(&total);
    out
}
