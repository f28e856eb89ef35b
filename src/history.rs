//! Linear undo/redo history over whole-document snapshots.
//!
//! Each entry is an immutable snapshot of `{elements, background, canvas}`
//! taken after a committed mutation. Selection and clipboard are transient
//! and never recorded. The model is strictly linear: pushing after an undo
//! discards the redo tail. Depth is bounded by [`MAX_HISTORY`]; once full,
//! the oldest snapshot is evicted, so very old states simply age out.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::MAX_HISTORY;
use crate::doc::{Background, CanvasConfig, Element};

/// One recorded document state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Full element list, including grouped children.
    pub elements: Vec<Element>,
    /// Document background.
    pub background: Background,
    /// Canvas configuration.
    pub canvas: CanvasConfig,
}

/// Bounded snapshot ring with a cursor into the current state.
///
/// Invariant: `entries` is never empty — the history is always seeded with
/// the initial (or freshly loaded) document state, and `cursor` always
/// points at a valid entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    cursor: usize,
}

impl History {
    /// Start a new history seeded with the initial document state.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self { entries, cursor: 0 }
    }

    /// Record a snapshot as the new current state, discarding any redo
    /// tail. Evicts the oldest entry when the ring is full.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        if self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry. Returns the snapshot to restore, or `None` when
    /// already at the oldest retained state.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry. Returns the snapshot to restore, or `None`
    /// when already at the newest state.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the history is seeded at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
