//! Scroll offset tracking for the "back to top" affordance.

/// Offset past which the affordance becomes visible.
pub const DEFAULT_BACK_TO_TOP_THRESHOLD: u32 = 200;

/// Scroll units covered by one terminal row.
pub const SCROLL_UNITS_PER_ROW: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    offset: u32,
    threshold: u32,
    back_to_top_visible: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(DEFAULT_BACK_TO_TOP_THRESHOLD)
    }
}

impl ScrollState {
    pub fn new(threshold: u32) -> Self {
        Self {
            offset: 0,
            threshold,
            back_to_top_visible: false,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn back_to_top_visible(&self) -> bool {
        self.back_to_top_visible
    }

    /// Record a new offset. Returns the new visibility only when it changed.
    pub fn update(&mut self, offset: u32) -> Option<bool> {
        self.offset = offset;
        let visible = offset > self.threshold;
        if visible != self.back_to_top_visible {
            self.back_to_top_visible = visible;
            Some(visible)
        } else {
            None
        }
    }
}

/// Convert a row offset reported by the terminal into scroll units.
pub fn rows_to_units(rows: u16) -> u32 {
    u32::from(rows) * SCROLL_UNITS_PER_ROW
}
