//! Bounded linear undo/redo history over whole-diagram snapshots.

use std::collections::VecDeque;

/// Largest number of snapshots kept, the initial one included.
pub const MAX_HISTORY: usize = 20;

/// Undo stack of owned snapshots with a cursor.
///
/// Always holds at least one snapshot; `index` points at the one matching
/// the live state. Saving while not at the tip discards everything after
/// the cursor.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    entries: VecDeque<T>,
    index: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T) -> Self {
        let mut entries = VecDeque::with_capacity(MAX_HISTORY);
        entries.push_back(initial);
        Self { entries, index: 0 }
    }

    /// Record `snapshot` as the new current state.
    pub fn save(&mut self, snapshot: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        if self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        tracing::debug!(index = self.index, len = self.entries.len(), "history saved");
    }

    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> &T {
        // The deque is never empty and index stays in range.
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_editor_history.rs"]
mod tests;
