//! The sorted index of position marks.
//!
//! One [`Mark`] per live [`Position`] handle, kept in ascending offset order
//! so range queries and shift starts are binary searches. Same-offset marks
//! are disambiguated by a monotone creation sequence, which doubles as the
//! identity key when an undo restores snapshotted offsets.
//!
//! Invariants:
//! - `marks` is sorted by offset (non-decreasing) at all times.
//! - A mark at offset 0 is pinned: an edit at offset 0 never shifts it.
//! - Dropped handles are reclaimed by [`MarkIndex::sweep`] before any
//!   structural mutation, so mutations never act on stale marks.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::position::{Position, PositionCell};

/// One tracked offset inside the index.
#[derive(Debug)]
struct Mark {
    /// Cached offset; kept in lockstep with the owner's cell while the
    /// owner is alive, and meaningful for ordering even after it is gone.
    offset: usize,
    /// Creation sequence: identity key and sort tiebreak.
    seq: u64,
    /// Weak back-reference to the externally held handle.
    owner: Weak<PositionCell>,
}

/// Offsets of the marks inside a removed range, captured before the removal
/// so an undo can put each one back exactly where it was.
#[derive(Debug, Clone, Default)]
pub(crate) struct MarkSnapshot {
    entries: SmallVec<[SnapshotEntry; 8]>,
}

#[derive(Debug, Clone, Copy)]
struct SnapshotEntry {
    seq: u64,
    offset: usize,
}

impl MarkSnapshot {
    fn prior_offset(&self, seq: u64) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.seq == seq)
            .map(|entry| entry.offset)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Sorted collection of marks with explicit-release reclamation.
#[derive(Debug)]
pub(crate) struct MarkIndex {
    marks: Vec<Mark>,
    next_seq: u64,
    /// Bumped by `Position::drop`; nonzero means a sweep has work to do.
    released: Rc<Cell<usize>>,
}

impl MarkIndex {
    pub(crate) fn new() -> Self {
        Self {
            marks: Vec::new(),
            next_seq: 0,
            released: Rc::new(Cell::new(0)),
        }
    }

    /// Create a mark at `offset` and hand back its owning position.
    pub(crate) fn create(&mut self, offset: usize) -> Position {
        self.sweep();
        let cell = Rc::new(PositionCell::new(offset));
        let seq = self.next_seq;
        self.next_seq += 1;
        // Insert after any existing marks at the same offset, keeping
        // insertion order among equals.
        let at = self.marks.partition_point(|mark| mark.offset <= offset);
        self.marks.insert(
            at,
            Mark {
                offset,
                seq,
                owner: Rc::downgrade(&cell),
            },
        );
        Position::new(cell, Rc::clone(&self.released))
    }

    /// Reclaim marks whose handle has been dropped. Runs in O(marks), but
    /// only when at least one handle was dropped since the last sweep.
    pub(crate) fn sweep(&mut self) {
        if self.released.get() == 0 {
            return;
        }
        let before = self.marks.len();
        self.marks.retain(|mark| mark.owner.strong_count() > 0);
        self.released.set(0);
        let reclaimed = before - self.marks.len();
        tracing::trace!(reclaimed, live = self.marks.len(), "swept released marks");
    }

    /// Shift marks for an insertion of `len` characters at `offset`.
    ///
    /// Every mark at or after the insertion point moves right, except marks
    /// pinned at offset 0 when the insertion is at the document start.
    pub(crate) fn insert_update(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.sweep();
        let start = self.marks.partition_point(|mark| mark.offset < offset);
        for mark in &mut self.marks[start..] {
            if mark.offset == 0 {
                continue;
            }
            mark.offset += len;
            if let Some(cell) = mark.owner.upgrade() {
                cell.set(mark.offset);
            }
        }
    }

    /// Snapshot the marks whose offset lies in `[offset, offset + count]`,
    /// right edge inclusive, in ascending order.
    pub(crate) fn marks_in_range(&mut self, offset: usize, count: usize) -> MarkSnapshot {
        self.sweep();
        let start = self.marks.partition_point(|mark| mark.offset < offset);
        let end = self
            .marks
            .partition_point(|mark| mark.offset <= offset + count);
        let mut entries = SmallVec::new();
        let mut previous = offset;
        for mark in &self.marks[start..end] {
            // Ordering here is load-bearing for all subsequent offset math.
            debug_assert!(
                mark.offset >= previous,
                "mark index out of order in range query"
            );
            previous = mark.offset;
            entries.push(SnapshotEntry {
                seq: mark.seq,
                offset: mark.offset,
            });
        }
        MarkSnapshot { entries }
    }

    /// Shift marks for a removal of `count` characters at `offset`: marks
    /// inside the removed span collapse to its start, marks past it move
    /// left.
    pub(crate) fn remove_update(&mut self, offset: usize, count: usize) {
        if count == 0 {
            return;
        }
        self.sweep();
        let start = self.marks.partition_point(|mark| mark.offset < offset);
        for mark in &mut self.marks[start..] {
            if mark.offset <= offset {
                continue;
            }
            mark.offset = if mark.offset <= offset + count {
                offset
            } else {
                mark.offset - count
            };
            if let Some(cell) = mark.owner.upgrade() {
                cell.set(mark.offset);
            }
        }
    }

    /// Reset each snapshotted mark that is still live to its prior offset,
    /// then restore sort order. Marks whose handle has since been dropped
    /// are skipped silently.
    pub(crate) fn restore(&mut self, snapshot: &MarkSnapshot) {
        self.sweep();
        for mark in &mut self.marks {
            if let Some(prior) = snapshot.prior_offset(mark.seq) {
                mark.offset = prior;
                if let Some(cell) = mark.owner.upgrade() {
                    cell.set(mark.offset);
                }
            }
        }
        self.marks.sort_by_key(|mark| (mark.offset, mark.seq));
    }

    /// Number of marks whose handle is still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|mark| mark.owner.strong_count() > 0)
            .count()
    }

    #[cfg(test)]
    fn offsets(&self) -> Vec<usize> {
        self.marks.iter().map(|mark| mark.offset).collect()
    }
}
