//! Linear snapshot history used for undo.
//!
//! Each entry is a self-contained PNG image of the whole page. Pushing after an
//! undo truncates every entry past the current position, so there is no redo.

use std::fmt;

/// An immutable, encoded snapshot of the full page.
#[derive(Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    bytes: Vec<u8>,
}

impl HistoryEntry {
    /// Wraps already-encoded PNG bytes.
    pub fn from_png(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Ordered snapshot stack with a cursor on the displayed entry.
///
/// `index` is `None` while the history is empty, otherwise it is always a
/// valid position in `entries`.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry after the current position, discarding anything newer.
    pub fn push(&mut self, entry: HistoryEntry) {
        let keep = self.index.map_or(0, |index| index + 1);
        if self.entries.len() > keep {
            log::debug!(
                "Discarding {} undone history entries",
                self.entries.len() - keep
            );
        }
        self.entries.truncate(keep);
        self.entries.push(entry);
        self.index = Some(self.entries.len() - 1);
    }

    /// Steps back one entry and returns the entry that should now be shown.
    ///
    /// Returns `None` (and changes nothing) when already at the first entry or
    /// when the history is empty.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        match self.index {
            Some(index) if index > 0 => {
                self.index = Some(index - 1);
                self.entries.get(index - 1)
            }
            _ => None,
        }
    }

    /// The entry [`undo`](Self::undo) would move to, without moving.
    pub fn previous(&self) -> Option<&HistoryEntry> {
        match self.index {
            Some(index) if index > 0 => self.entries.get(index - 1),
            _ => None,
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|index| index > 0)
    }

    /// The entry at the cursor, if any.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.and_then(|index| self.entries.get(index))
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
