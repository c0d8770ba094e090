//! The storage seam between the content facade and its backing buffer.
//!
//! [`TextStore`] is implemented by [`ArrayStore`] (contiguous buffer) and
//! [`GapStore`] (movable-gap buffer). Both keep a trailing `'\n'` sentinel
//! that can never be removed, so a store is never shorter than one character
//! and every document ends in a line terminator.
//!
//! [`ArrayStore`]: crate::array::ArrayStore
//! [`GapStore`]: crate::gap::GapStore

use crate::error::ContentError;

/// Mutable character storage addressed by character offset.
///
/// Implementations validate all arguments before mutating, so a failed
/// operation leaves the store unchanged.
pub trait TextStore {
    /// Current logical length in characters, including the trailing sentinel.
    /// Always at least 1.
    fn len(&self) -> usize;

    /// Insert `text` before the character at `offset`.
    ///
    /// Valid offsets are `0..len()`; appending goes through the offset of the
    /// trailing sentinel (`len() - 1`).
    fn insert(&mut self, offset: usize, text: &str) -> Result<(), ContentError>;

    /// Remove `count` characters starting at `offset`.
    ///
    /// Requires `offset + count < len()` — the trailing sentinel is never
    /// removable.
    fn remove(&mut self, offset: usize, count: usize) -> Result<(), ContentError>;

    /// Borrow `count` characters starting at `offset` without copying.
    ///
    /// Requires `offset + count <= len()` (the sentinel is readable). The
    /// returned view borrows the backing buffer; the borrow checker prevents
    /// holding it across a mutation.
    fn read(&self, offset: usize, count: usize) -> Result<StoreView<'_>, ContentError>;
}

/// A zero-copy view into a store's backing buffer.
///
/// A gap buffer cannot always hand out one contiguous slice, so the view is
/// a (head, tail) pair of slices; for contiguous backends the tail is empty.
#[derive(Debug, Clone, Copy)]
pub struct StoreView<'a> {
    head: &'a [char],
    tail: &'a [char],
}

impl<'a> StoreView<'a> {
    pub(crate) fn contiguous(head: &'a [char]) -> Self {
        Self { head, tail: &[] }
    }

    pub(crate) fn split(head: &'a [char], tail: &'a [char]) -> Self {
        Self { head, tail }
    }

    /// Number of characters in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    /// Whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail.is_empty()
    }

    /// The underlying (head, tail) slice pair. The tail is empty when the
    /// viewed range is contiguous in the backing buffer.
    #[must_use]
    pub fn as_slices(&self) -> (&'a [char], &'a [char]) {
        (self.head, self.tail)
    }

    /// Iterate over the characters of the view in document order.
    pub fn chars(&self) -> impl Iterator<Item = char> + 'a {
        self.head.iter().chain(self.tail.iter()).copied()
    }
}

impl std::fmt::Display for StoreView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write as _;
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

impl PartialEq<&str> for StoreView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}
