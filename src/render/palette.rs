//! Rotating color groups for the forest table

use console::Style;
use std::collections::VecDeque;

/// One of the five group colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupColor {
    Cyan,
    Magenta,
    Yellow,
    Green,
    Blue,
}

impl GroupColor {
    /// All colors in rotation order
    pub const ALL: [GroupColor; 5] = [
        GroupColor::Cyan,
        GroupColor::Magenta,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Blue,
    ];

    /// Position in rotation order, usable where color is unavailable
    pub fn index(self) -> usize {
        match self {
            Self::Cyan => 0,
            Self::Magenta => 1,
            Self::Yellow => 2,
            Self::Green => 3,
            Self::Blue => 4,
        }
    }

    /// Terminal style for this color
    pub fn style(self) -> Style {
        match self {
            Self::Cyan => Style::new().cyan(),
            Self::Magenta => Style::new().magenta(),
            Self::Yellow => Style::new().yellow(),
            Self::Green => Style::new().green(),
            Self::Blue => Style::new().blue(),
        }
    }
}

/// Round-robin palette: the color handed out goes to the back of the queue
#[derive(Debug, Clone)]
pub struct Palette {
    colors: VecDeque<GroupColor>,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            colors: GroupColor::ALL.into_iter().collect(),
        }
    }

    /// Take the next color and rotate it to the back
    pub fn next_color(&mut self) -> GroupColor {
        self.colors.rotate_left(1);
        // Non-empty: built from ALL and never shrinks
        self.colors[self.colors.len() - 1]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
