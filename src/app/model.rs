//! Cursor model for the sound list.

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    /// Highlighted row, in catalog order.
    pub selected: usize,
    len: usize,
}

impl App {
    /// Create a new `App` for a list of `len` rows.
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn has_rows(&self) -> bool {
        self.len > 0
    }

    /// Move down, wrapping to the top.
    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % self.len;
    }

    /// Move up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            self.len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Jump to `idx` when it is in range.
    pub fn set_selected(&mut self, idx: usize) {
        if idx < self.len {
            self.selected = idx;
        }
    }
}
