//! The content facade: character storage plus position tracking behind one
//! narrow contract.
//!
//! [`DocumentContent`] owns the pair (store, mark index) and orchestrates
//! every edit: bounds checks first, then (for removals) the mark snapshot,
//! then the store mutation, then the mark shifts, and finally the
//! [`EditToken`] that makes the edit reversible. The store and the index
//! never call back into the facade.
//!
//! All operations are synchronous and bounded; the facade assumes the
//! single-writer discipline of the document layer above it (Rust's `&mut`
//! rules enforce exactly that in-process).

use crate::array::ArrayStore;
use crate::error::ContentError;
use crate::gap::GapStore;
use crate::marks::MarkIndex;
use crate::position::Position;
use crate::store::{StoreView, TextStore};
use crate::undo::{EditKind, EditState, EditToken};

/// Document content backed by the contiguous [`ArrayStore`].
pub type ArrayContent = DocumentContent<ArrayStore>;

/// Document content backed by the movable-gap [`GapStore`].
pub type GapContent = DocumentContent<GapStore>;

/// Mutable document text with stable positions and reversible edits.
///
/// # Example
/// ```
/// use vellum_doc::ArrayContent;
///
/// let mut content = ArrayContent::new();
/// content.insert(0, "hello")?;
///
/// let pos = content.create_position(5); // tracks the trailing newline
/// content.insert(0, "X")?;
/// assert_eq!(content.text(0, content.len())?, "Xhello\n");
/// assert_eq!(pos.offset(), 6);
///
/// let mut edit = content.remove(0, 1)?;
/// assert_eq!(pos.offset(), 5);
/// content.undo(&mut edit)?;
/// assert_eq!(pos.offset(), 6);
/// # Ok::<(), vellum_doc::ContentError>(())
/// ```
#[derive(Debug)]
pub struct DocumentContent<S: TextStore = ArrayStore> {
    store: S,
    marks: MarkIndex,
}

impl<S: TextStore + Default> DocumentContent<S> {
    /// Create empty content: one trailing line terminator, no marks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: S::default(),
            marks: MarkIndex::new(),
        }
    }

    /// Create content pre-filled with `text` (ahead of the sentinel).
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut content = Self::new();
        if !text.is_empty() {
            let seeded = content.insert(0, text);
            debug_assert!(seeded.is_ok(), "offset 0 is always a valid insertion point");
        }
        content
    }
}

impl<S: TextStore + Default> Default for DocumentContent<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TextStore> DocumentContent<S> {
    /// Document length in characters, including the trailing sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the document holds no text besides the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 1
    }

    /// Insert `text` before the character at `offset`.
    ///
    /// Marks at or after `offset` shift right by the inserted length,
    /// except marks pinned at offset 0. Returns the token that reverses
    /// the edit.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<EditToken, ContentError> {
        self.store.insert(offset, text)?;
        self.marks.insert_update(offset, text.chars().count());
        Ok(EditToken::inserted(offset, text.to_string()))
    }

    /// Remove `count` characters starting at `offset`.
    ///
    /// Marks inside the removed span collapse to `offset`; marks past it
    /// shift left. The returned token carries the removed text and the
    /// pre-removal mark offsets, so undoing restores positions exactly.
    pub fn remove(&mut self, offset: usize, count: usize) -> Result<EditToken, ContentError> {
        self.check_removal(offset, count)?;
        let removed = self.store.read(offset, count)?.to_string();
        let snapshot = self.marks.marks_in_range(offset, count);
        self.store.remove(offset, count)?;
        self.marks.remove_update(offset, count);
        Ok(EditToken::removed(offset, removed, snapshot))
    }

    /// Reverse the effect of `token`.
    ///
    /// Fails with [`ContentError::CannotUndo`] if the token is already
    /// reverted. Undoing a removal reinserts the text and then restores
    /// every surviving snapshotted mark to its exact pre-removal offset.
    pub fn undo(&mut self, token: &mut EditToken) -> Result<(), ContentError> {
        if !token.is_applied() {
            return Err(ContentError::CannotUndo);
        }
        match token.kind {
            EditKind::Inserted => self.take_out(token)?,
            EditKind::Removed => self.put_back(token)?,
        }
        token.state = EditState::Reverted;
        tracing::trace!(offset = token.offset, kind = ?token.kind, "edit undone");
        Ok(())
    }

    /// Replay the effect of a reverted `token`.
    ///
    /// Fails with [`ContentError::CannotRedo`] if the token is still
    /// applied. Undo and redo alternate indefinitely as long as no
    /// intervening edit touched the region.
    pub fn redo(&mut self, token: &mut EditToken) -> Result<(), ContentError> {
        if token.is_applied() {
            return Err(ContentError::CannotRedo);
        }
        match token.kind {
            EditKind::Inserted => self.put_back(token)?,
            EditKind::Removed => self.take_out(token)?,
        }
        token.state = EditState::Applied;
        tracing::trace!(offset = token.offset, kind = ?token.kind, "edit redone");
        Ok(())
    }

    /// Create a tracked position at `offset`.
    ///
    /// The handle stays valid across arbitrary edits; dropping it releases
    /// the underlying mark.
    pub fn create_position(&mut self, offset: usize) -> Position {
        self.marks.create(offset)
    }

    /// Number of live tracked positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.marks.live_count()
    }

    /// Copy `count` characters starting at `offset` into a fresh `String`.
    pub fn text(&self, offset: usize, count: usize) -> Result<String, ContentError> {
        Ok(self.store.read(offset, count)?.to_string())
    }

    /// Borrow `count` characters starting at `offset` without copying.
    ///
    /// The view borrows the backing buffer, so it cannot be held across a
    /// subsequent mutation.
    pub fn read(&self, offset: usize, count: usize) -> Result<StoreView<'_>, ContentError> {
        self.store.read(offset, count)
    }

    /// Append `count` characters starting at `offset` to `buf`.
    pub fn read_into(
        &self,
        offset: usize,
        count: usize,
        buf: &mut String,
    ) -> Result<(), ContentError> {
        let view = self.store.read(offset, count)?;
        buf.extend(view.chars());
        Ok(())
    }

    fn check_removal(&self, offset: usize, count: usize) -> Result<(), ContentError> {
        let len = self.store.len();
        let end = offset
            .checked_add(count)
            .ok_or(ContentError::InvalidLength { count })?;
        if end >= len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        Ok(())
    }

    /// Remove the token's text from the document, capturing a fresh mark
    /// snapshot into the token for the opposite replay.
    fn take_out(&mut self, token: &mut EditToken) -> Result<(), ContentError> {
        let count = token.char_count();
        self.check_removal(token.offset, count)?;
        token.snapshot = Some(self.marks.marks_in_range(token.offset, count));
        self.store.remove(token.offset, count)?;
        self.marks.remove_update(token.offset, count);
        Ok(())
    }

    /// Reinsert the token's text and restore the snapshotted mark offsets.
    fn put_back(&mut self, token: &mut EditToken) -> Result<(), ContentError> {
        self.store.insert(token.offset, &token.text)?;
        self.marks.insert_update(token.offset, token.char_count());
        if let Some(snapshot) = &token.snapshot {
            self.marks.restore(snapshot);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_text<S: TextStore>(content: &DocumentContent<S>) -> String {
        content.text(0, content.len()).unwrap()
    }

    #[test]
    fn new_content_is_a_single_newline() {
        let content = ArrayContent::new();
        assert_eq!(content.len(), 1);
        assert!(content.is_empty());
        assert_eq!(doc_text(&content), "\n");
    }

    #[test]
    fn with_text_prefills() {
        let content = ArrayContent::with_text("abcdef");
        assert_eq!(doc_text(&content), "abcdef\n");
        assert!(!content.is_empty());
        assert_eq!(doc_text(&GapContent::with_text("abcdef")), "abcdef\n");
    }

    #[test]
    fn with_text_empty_is_just_the_sentinel() {
        let content = ArrayContent::with_text("");
        assert!(content.is_empty());
        assert_eq!(doc_text(&content), "\n");
    }

    #[test]
    fn insert_past_end_fails_without_mutating() {
        let mut content = ArrayContent::new();
        assert_eq!(
            content.insert(1, "x").unwrap_err(),
            ContentError::InvalidLocation { offset: 1, len: 1 }
        );
        assert_eq!(doc_text(&content), "\n");
    }

    #[test]
    fn remove_reaching_sentinel_fails_without_mutating() {
        let mut content = ArrayContent::with_text("abc");
        let pos = content.create_position(2);
        assert_eq!(
            content.remove(2, 2).unwrap_err(),
            ContentError::InvalidLocation { offset: 2, len: 4 }
        );
        assert_eq!(doc_text(&content), "abc\n");
        assert_eq!(pos.offset(), 2);
    }

    #[test]
    fn remove_returns_the_removed_text() {
        let mut content = ArrayContent::with_text("abcdef");
        let token = content.remove(1, 3).unwrap();
        assert_eq!(token.text(), "bcd");
        assert_eq!(token.offset(), 1);
        assert_eq!(doc_text(&content), "aef\n");
    }

    #[test]
    fn scenario_insert_track_insert_remove() {
        // The walk-through from the design discussion: "\n" -> "hello\n"
        // -> "Xhello\n" -> "hello\n", with a position riding the newline.
        let mut content = ArrayContent::new();
        content.insert(0, "hello").unwrap();
        assert_eq!(content.len(), 6);
        let pos = content.create_position(5);
        content.insert(0, "X").unwrap();
        assert_eq!(doc_text(&content), "Xhello\n");
        assert_eq!(pos.offset(), 6);
        content.remove(0, 1).unwrap();
        assert_eq!(doc_text(&content), "hello\n");
        assert_eq!(pos.offset(), 5);
    }

    #[test]
    fn scenario_collapse_and_undo() {
        let mut content = ArrayContent::with_text("abcdef");
        let p2 = content.create_position(2);
        let p4 = content.create_position(4);
        let mut edit = content.remove(1, 3).unwrap();
        assert_eq!(doc_text(&content), "aef\n");
        assert_eq!(p2.offset(), 1);
        assert_eq!(p4.offset(), 1);
        content.undo(&mut edit).unwrap();
        assert_eq!(doc_text(&content), "abcdef\n");
        assert_eq!(p2.offset(), 2);
        assert_eq!(p4.offset(), 4);
    }

    #[test]
    fn undo_state_machine_rejects_double_application() {
        let mut content = ArrayContent::new();
        let mut token = content.insert(0, "abc").unwrap();
        assert_eq!(content.redo(&mut token), Err(ContentError::CannotRedo));
        content.undo(&mut token).unwrap();
        assert_eq!(content.undo(&mut token), Err(ContentError::CannotUndo));
        content.redo(&mut token).unwrap();
        assert_eq!(doc_text(&content), "abc\n");
    }

    #[test]
    fn undo_redo_alternate_indefinitely() {
        let mut content = ArrayContent::with_text("abcdef");
        let pos = content.create_position(4);
        let mut edit = content.remove(1, 3).unwrap();
        for _ in 0..3 {
            content.undo(&mut edit).unwrap();
            assert_eq!(doc_text(&content), "abcdef\n");
            assert_eq!(pos.offset(), 4);
            content.redo(&mut edit).unwrap();
            assert_eq!(doc_text(&content), "aef\n");
            assert_eq!(pos.offset(), 1);
        }
    }

    #[test]
    fn undoing_an_insertion_restores_positions_on_redo() {
        let mut content = ArrayContent::with_text("ab");
        let mut token = content.insert(1, "xyz").unwrap();
        let pos = content.create_position(2); // inside the inserted span
        content.undo(&mut token).unwrap();
        assert_eq!(doc_text(&content), "ab\n");
        assert_eq!(pos.offset(), 1);
        content.redo(&mut token).unwrap();
        assert_eq!(doc_text(&content), "axyzb\n");
        assert_eq!(pos.offset(), 2);
    }

    #[test]
    fn read_into_appends() {
        let content = ArrayContent::with_text("hello");
        let mut buf = String::from(">");
        content.read_into(1, 3, &mut buf).unwrap();
        assert_eq!(buf, ">ell");
    }

    #[test]
    fn zero_copy_read_matches_text() {
        let content = GapContent::with_text("hello world");
        let view = content.read(6, 5).unwrap();
        assert!(view == "world");
        assert_eq!(content.text(6, 5).unwrap(), "world");
    }

    #[test]
    fn position_count_tracks_live_handles() {
        let mut content = ArrayContent::with_text("abc");
        let a = content.create_position(1);
        let b = content.create_position(2);
        assert_eq!(content.position_count(), 2);
        drop(a);
        assert_eq!(content.position_count(), 1);
        drop(b);
        assert_eq!(content.position_count(), 0);
    }

    #[test]
    fn gap_backend_matches_array_backend() {
        let mut array = ArrayContent::new();
        let mut gap = GapContent::new();
        let script: &[(usize, &str)] = &[(0, "hello"), (5, " world"), (0, ">> "), (3, "doc: ")];
        for &(offset, text) in script {
            array.insert(offset, text).unwrap();
            gap.insert(offset, text).unwrap();
        }
        array.remove(2, 5).unwrap();
        gap.remove(2, 5).unwrap();
        assert_eq!(doc_text(&array), doc_text(&gap));
    }
}
