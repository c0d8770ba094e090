//! Gap-buffer character storage.
//!
//! [`GapStore`] keeps the document in a `Vec<char>` with a movable hole (the
//! gap) between two content halves: `[pre-gap | gap | post-gap]`. An edit
//! first moves the gap to the edit offset (O(distance)), then inserting fills
//! the gap and removing widens it, both O(count). Consecutive edits at nearby
//! offsets — the common typing pattern — therefore cost almost nothing per
//! character.
//!
//! Reads never move the gap; a range that straddles it comes back as a split
//! [`StoreView`].

use crate::error::ContentError;
use crate::store::{StoreView, TextStore};

const INITIAL_GAP: usize = 64;

/// Gap-buffer backend with the same sentinel and bounds contract as
/// [`ArrayStore`](crate::array::ArrayStore).
#[derive(Debug, Clone)]
pub struct GapStore {
    /// Backing storage: `[pre-gap | gap | post-gap]`.
    data: Vec<char>,
    /// First slot of the gap.
    gap_start: usize,
    /// First used slot after the gap.
    gap_end: usize,
}

impl GapStore {
    /// Create a store containing only the sentinel, with the gap in front
    /// of it.
    #[must_use]
    pub fn new() -> Self {
        let mut data = vec!['\0'; INITIAL_GAP];
        let last = data.len() - 1;
        data[last] = '\n';
        Self {
            data,
            gap_start: 0,
            gap_end: last,
        }
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Move the gap so that it starts at logical offset `pos`.
    fn move_gap_to(&mut self, pos: usize) {
        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grow the gap in place to at least `min` slots, keeping its position.
    fn ensure_gap(&mut self, min: usize) {
        if self.gap_len() >= min {
            return;
        }
        // Grow by at least the current backing length so the gap refills
        // O(log n) times over a run of inserts.
        let growth = (min - self.gap_len()).max(self.data.len());
        let old_len = self.data.len();
        let new_len = old_len + growth;
        let post_len = old_len - self.gap_end;
        self.data.resize(new_len, '\0');
        if post_len > 0 {
            self.data
                .copy_within(self.gap_end..old_len, new_len - post_len);
        }
        self.gap_end = new_len - post_len;
    }
}

impl Default for GapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore for GapStore {
    fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), ContentError> {
        let len = self.len();
        if offset >= len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        let added = text.chars().count();
        if added == 0 {
            return Ok(());
        }
        self.move_gap_to(offset);
        self.ensure_gap(added);
        let start = self.gap_start;
        for (slot, ch) in self.data[start..start + added].iter_mut().zip(text.chars()) {
            *slot = ch;
        }
        self.gap_start += added;
        Ok(())
    }

    fn remove(&mut self, offset: usize, count: usize) -> Result<(), ContentError> {
        let len = self.len();
        let end = offset
            .checked_add(count)
            .ok_or(ContentError::InvalidLength { count })?;
        if end >= len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        // Removal is just widening the gap over the doomed range.
        self.move_gap_to(offset);
        self.gap_end += count;
        Ok(())
    }

    fn read(&self, offset: usize, count: usize) -> Result<StoreView<'_>, ContentError> {
        let len = self.len();
        let end = offset
            .checked_add(count)
            .ok_or(ContentError::InvalidLength { count })?;
        if end > len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        let gap = self.gap_len();
        if end <= self.gap_start {
            Ok(StoreView::contiguous(&self.data[offset..end]))
        } else if offset >= self.gap_start {
            Ok(StoreView::contiguous(&self.data[offset + gap..end + gap]))
        } else {
            let head = &self.data[offset..self.gap_start];
            let tail = &self.data[self.gap_end..self.gap_end + (end - self.gap_start)];
            Ok(StoreView::split(head, tail))
        }
    }
}
