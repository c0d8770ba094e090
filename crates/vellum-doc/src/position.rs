//! External handles to tracked document offsets.

use std::cell::Cell;
use std::rc::Rc;

/// Shared offset slot between a [`Position`] handle and its mark in the
/// index. The index writes through on every shift; the handle only reads.
#[derive(Debug)]
pub(crate) struct PositionCell {
    offset: Cell<usize>,
}

impl PositionCell {
    pub(crate) fn new(offset: usize) -> Self {
        Self {
            offset: Cell::new(offset),
        }
    }

    pub(crate) fn get(&self) -> usize {
        self.offset.get()
    }

    pub(crate) fn set(&self, offset: usize) {
        self.offset.set(offset);
    }
}

/// A tracked offset that survives edits without caller maintenance.
///
/// Created by [`DocumentContent::create_position`]. The handle resolves in
/// O(1); the mark index adjusts it as text is inserted and removed around
/// it. Dropping the handle releases the underlying mark — the index reclaims
/// it before its next structural mutation.
///
/// Each handle owns exactly one mark, so `Position` is deliberately not
/// `Clone`; ask the content for another position instead.
///
/// [`DocumentContent::create_position`]: crate::content::DocumentContent::create_position
#[derive(Debug)]
pub struct Position {
    cell: Rc<PositionCell>,
    released: Rc<Cell<usize>>,
}

impl Position {
    pub(crate) fn new(cell: Rc<PositionCell>, released: Rc<Cell<usize>>) -> Self {
        Self { cell, released }
    }

    /// The current offset of this position in the document.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.cell.get()
    }
}

impl Drop for Position {
    fn drop(&mut self) {
        // Signals the mark index that one owner is gone; the next sweep
        // reclaims the mark.
        self.released.set(self.released.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_reads_the_shared_cell() {
        let cell = Rc::new(PositionCell::new(4));
        let released = Rc::new(Cell::new(0));
        let pos = Position::new(Rc::clone(&cell), Rc::clone(&released));
        assert_eq!(pos.offset(), 4);
        cell.set(9);
        assert_eq!(pos.offset(), 9);
    }

    #[test]
    fn drop_bumps_the_release_counter() {
        let released = Rc::new(Cell::new(0));
        let pos = Position::new(
            Rc::new(PositionCell::new(0)),
            Rc::clone(&released),
        );
        drop(pos);
        assert_eq!(released.get(), 1);
    }
}
