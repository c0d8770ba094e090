//! Undo tokens and the edit history.
//!
//! Every successful edit on a [`DocumentContent`] yields an [`EditToken`]
//! holding exactly what is needed to reverse it: the affected text and, for
//! removals, the offsets of the marks that sat inside the removed range.
//! [`UndoHistory`] is an optional two-stack manager over those tokens for
//! callers that want linear undo/redo instead of driving tokens themselves.
//!
//! [`DocumentContent`]: crate::content::DocumentContent

use crate::content::DocumentContent;
use crate::error::ContentError;
use crate::marks::MarkSnapshot;
use crate::store::TextStore;

/// Default bound on [`UndoHistory`] depth.
pub const DEFAULT_MAX_HISTORY: usize = 1000;

/// Which direction the recorded edit moved text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// The edit inserted `text` at `offset`.
    Inserted,
    /// The edit removed `text` from `offset`.
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditState {
    Applied,
    Reverted,
}

/// A reversible record of one edit.
///
/// Tokens are a two-state machine: `undo` flips an applied token to
/// reverted, `redo` flips it back. The pair replays cleanly any number of
/// times as long as no intervening edit touched the same region — guarding
/// against intervening edits is the caller's bookkeeping (or
/// [`UndoHistory`]'s stack discipline).
#[derive(Debug)]
pub struct EditToken {
    pub(crate) offset: usize,
    pub(crate) text: String,
    pub(crate) kind: EditKind,
    pub(crate) state: EditState,
    /// For removals: mark offsets captured before the text came out. For
    /// insertions: captured lazily when an undo removes the text again.
    pub(crate) snapshot: Option<MarkSnapshot>,
}

impl EditToken {
    pub(crate) fn inserted(offset: usize, text: String) -> Self {
        Self {
            offset,
            text,
            kind: EditKind::Inserted,
            state: EditState::Applied,
            snapshot: None,
        }
    }

    pub(crate) fn removed(offset: usize, text: String, snapshot: MarkSnapshot) -> Self {
        Self {
            offset,
            text,
            kind: EditKind::Removed,
            state: EditState::Applied,
            snapshot: Some(snapshot),
        }
    }

    /// Offset the edit happened at.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the edit inserted or removed text.
    #[must_use]
    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// The literal text the edit inserted or removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `true` while the edit's effect is present in the document.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.state == EditState::Applied
    }

    /// Character count of the affected text.
    pub(crate) fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Bounded linear undo/redo over [`EditToken`]s.
///
/// Recording a new edit clears the redo stack; histories deeper than the
/// configured bound drop their oldest entry.
#[derive(Debug)]
pub struct UndoHistory {
    undo_stack: Vec<EditToken>,
    redo_stack: Vec<EditToken>,
    max_history: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoHistory {
    /// Create a history bounded to [`DEFAULT_MAX_HISTORY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Create a history with a specific depth bound (0 = unlimited).
    #[must_use]
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Record a fresh edit. Any redoable future is discarded.
    pub fn record(&mut self, token: EditToken) {
        self.redo_stack.clear();
        self.undo_stack.push(token);
        if self.max_history > 0 && self.undo_stack.len() > self.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the most recent edit against `content`.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. On error the
    /// token stays on the undo stack.
    pub fn undo<S: TextStore>(
        &mut self,
        content: &mut DocumentContent<S>,
    ) -> Result<bool, ContentError> {
        let Some(mut token) = self.undo_stack.pop() else {
            return Ok(false);
        };
        match content.undo(&mut token) {
            Ok(()) => {
                self.redo_stack.push(token);
                Ok(true)
            }
            Err(err) => {
                self.undo_stack.push(token);
                Err(err)
            }
        }
    }

    /// Redo the most recently undone edit against `content`.
    ///
    /// Returns `Ok(false)` when there is nothing to redo. On error the
    /// token stays on the redo stack.
    pub fn redo<S: TextStore>(
        &mut self,
        content: &mut DocumentContent<S>,
    ) -> Result<bool, ContentError> {
        let Some(mut token) = self.redo_stack.pop() else {
            return Ok(false);
        };
        match content.redo(&mut token) {
            Ok(()) => {
                self.undo_stack.push(token);
                Ok(true)
            }
            Err(err) => {
                self.redo_stack.push(token);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ArrayContent;

    fn doc_text(content: &ArrayContent) -> String {
        content.text(0, content.len()).unwrap()
    }

    #[test]
    fn token_accessors() {
        let mut content = ArrayContent::new();
        let token = content.insert(0, "hi").unwrap();
        assert_eq!(token.offset(), 0);
        assert_eq!(token.kind(), EditKind::Inserted);
        assert_eq!(token.text(), "hi");
        assert!(token.is_applied());
    }

    #[test]
    fn history_undo_redo_round_trip() {
        let mut content = ArrayContent::new();
        let mut history = UndoHistory::new();
        history.record(content.insert(0, "hello").unwrap());
        history.record(content.insert(5, " world").unwrap());
        assert_eq!(doc_text(&content), "hello world\n");

        assert!(history.undo(&mut content).unwrap());
        assert_eq!(doc_text(&content), "hello\n");
        assert!(history.undo(&mut content).unwrap());
        assert_eq!(doc_text(&content), "\n");
        assert!(!history.undo(&mut content).unwrap());

        assert!(history.redo(&mut content).unwrap());
        assert!(history.redo(&mut content).unwrap());
        assert_eq!(doc_text(&content), "hello world\n");
        assert!(!history.redo(&mut content).unwrap());
    }

    #[test]
    fn record_clears_redo() {
        let mut content = ArrayContent::new();
        let mut history = UndoHistory::new();
        history.record(content.insert(0, "ab").unwrap());
        history.undo(&mut content).unwrap();
        assert!(history.can_redo());
        history.record(content.insert(0, "xy").unwrap());
        assert!(!history.can_redo());
        assert!(history.can_undo());
    }

    #[test]
    fn history_depth_is_bounded() {
        let mut content = ArrayContent::new();
        let mut history = UndoHistory::with_max_history(2);
        for _ in 0..5 {
            history.record(content.insert(0, "a").unwrap());
        }
        assert_eq!(doc_text(&content), "aaaaa\n");
        assert!(history.undo(&mut content).unwrap());
        assert!(history.undo(&mut content).unwrap());
        assert!(!history.undo(&mut content).unwrap());
        assert_eq!(doc_text(&content), "aaa\n");
    }
}
