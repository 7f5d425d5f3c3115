//! Rotating color assignment for new sprints.
//!
//! The palette is a fixed ordered list of tokens. A cursor into it is owned by
//! the store, persisted next to the sprints, and advanced on every creation.

use crate::Sprint;

/// The reference palette: twenty distinct hex tokens.
pub const STANDARD_COLORS: [&str; 20] = [
    "#3b82f6", // blue
    "#ef4444", // red
    "#22c55e", // green
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#6366f1", // indigo
    "#84cc16", // lime
    "#06b6d4", // cyan
    "#d946ef", // fuchsia
    "#eab308", // yellow
    "#10b981", // emerald
    "#f43f5e", // rose
    "#0ea5e9", // sky
    "#a855f7", // purple
    "#64748b", // slate
    "#78716c", // stone
    "#71717a", // zinc
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

impl Default for Palette {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        colors: &STANDARD_COLORS,
    };

    /// Position of `token` in the palette. Hex tokens compare case-insensitively;
    /// anything not in the palette is a custom color and has no index.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        let token = token.trim();
        self.colors
            .iter()
            .position(|color| color.eq_ignore_ascii_case(token))
    }

    /// Bring a possibly out-of-range cursor back inside the palette.
    pub fn normalize_cursor(&self, cursor: usize) -> usize {
        cursor % self.colors.len()
    }

    /// Color for `cursor` and the cursor that follows it.
    pub fn next_color(&self, cursor: usize) -> (&'static str, usize) {
        let cursor = self.normalize_cursor(cursor);
        (self.colors[cursor], (cursor + 1) % self.colors.len())
    }

    /// Cursor to continue from after a bulk import: one past the highest
    /// palette index used by the imported sprints, or zero when none of them
    /// uses a palette color.
    pub fn cursor_after_import(&self, sprints: &[Sprint]) -> usize {
        sprints
            .iter()
            .filter_map(|sprint| self.index_of(&sprint.color))
            .max()
            .map(|max_index| (max_index + 1) % self.colors.len())
            .unwrap_or(0)
    }
}
