//! # Undo/Redo Stack
//!
//! Linear history of full page snapshots with a cursor.
//!
//! ## Design
//!
//! - The snapshot under the cursor is always the page currently shown
//! - Recording truncates everything after the cursor (redo is lost once a
//!   fresh edit follows an undo)
//! - The stack keeps at most `max_levels` snapshots; the oldest are evicted
//!   first and the cursor shifts with them
//! - Undo/redo only move the cursor; the session copies the snapshot back
//!
//! Snapshots are whole pages. Pages are small (tens of blocks) so copying is
//! cheaper than maintaining inverse operations.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.seed(page.clone());
//!
//! stack.record(edited.clone());
//! assert_eq!(stack.undo(), Some(&page));
//! assert_eq!(stack.redo(), Some(&edited));
//! ```

use std::collections::VecDeque;

use crate::document::Page;

/// Default number of retained snapshots
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo/redo stack for page editing
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Snapshots, oldest first
    snapshots: VecDeque<Page>,

    /// Cursor into `snapshots`
    index: usize,

    /// Maximum number of retained snapshots (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with the default limit (50)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an undo stack with a custom limit
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            index: 0,
            max_levels,
        }
    }

    /// Reset history to a single snapshot at index 0
    pub fn seed(&mut self, page: Page) {
        self.snapshots.clear();
        self.snapshots.push_back(page);
        self.index = 0;
    }

    /// Record a new snapshot after the cursor
    pub fn record(&mut self, page: Page) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.index + 1);
        }
        self.snapshots.push_back(page);
        self.index = self.snapshots.len() - 1;

        if self.max_levels > 0 {
            while self.snapshots.len() > self.max_levels {
                self.snapshots.pop_front();
                self.index -= 1;
            }
        }
    }

    /// Step back; returns the snapshot now under the cursor
    pub fn undo(&mut self) -> Option<&Page> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.snapshots.get(self.index)
    }

    /// Step forward; returns the snapshot now under the cursor
    pub fn redo(&mut self) -> Option<&Page> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.snapshots.get(self.index)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Page> {
        self.snapshots.get(self.index)
    }

    /// Overwrite the snapshot under the cursor (server merges)
    pub fn replace_current(&mut self, page: Page) {
        match self.snapshots.get_mut(self.index) {
            Some(slot) => *slot = page,
            None => self.seed(page),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.index = 0;
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
