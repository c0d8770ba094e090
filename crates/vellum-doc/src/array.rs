//! Contiguous growable character storage.
//!
//! [`ArrayStore`] keeps the whole document in one `Vec<char>`. Edits shift
//! the trailing characters with a single bulk copy, so an edit costs
//! O(len - offset) plus amortized growth. This is the simpler of the two
//! backends and the better fit for small documents and scattered edits;
//! [`GapStore`](crate::gap::GapStore) wins for localized typing.

use crate::error::ContentError;
use crate::store::{StoreView, TextStore};

const INITIAL_CAPACITY: usize = 16;

/// Contiguous character buffer with a trailing `'\n'` sentinel.
///
/// Created with logical length 1 (just the sentinel). Growth at least
/// doubles the capacity so repeated inserts stay amortized O(1) per
/// character; removals shrink the logical length but never the capacity.
#[derive(Debug, Clone)]
pub struct ArrayStore {
    data: Vec<char>,
}

impl ArrayStore {
    /// Create a store containing only the sentinel.
    #[must_use]
    pub fn new() -> Self {
        let mut data = Vec::with_capacity(INITIAL_CAPACITY);
        data.push('\n');
        Self { data }
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.data.capacity()
    }
}

impl Default for ArrayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore for ArrayStore {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), ContentError> {
        let len = self.data.len();
        if offset >= len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        let added = text.chars().count();
        if added == 0 {
            return Ok(());
        }
        let needed = len + added;
        if needed > self.data.capacity() {
            // At least double so a run of inserts reallocates O(log n) times.
            let target = (self.data.capacity() * 2).max(needed * 2);
            self.data.reserve_exact(target - len);
        }
        self.data.resize(needed, '\0');
        self.data.copy_within(offset..len, offset + added);
        for (slot, ch) in self.data[offset..offset + added].iter_mut().zip(text.chars()) {
            *slot = ch;
        }
        Ok(())
    }

    fn remove(&mut self, offset: usize, count: usize) -> Result<(), ContentError> {
        let len = self.data.len();
        let end = offset
            .checked_add(count)
            .ok_or(ContentError::InvalidLength { count })?;
        // The sentinel at len - 1 must survive every removal.
        if end >= len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        self.data.copy_within(end.., offset);
        self.data.truncate(len - count);
        Ok(())
    }

    fn read(&self, offset: usize, count: usize) -> Result<StoreView<'_>, ContentError> {
        let len = self.data.len();
        let end = offset
            .checked_add(count)
            .ok_or(ContentError::InvalidLength { count })?;
        if end > len {
            return Err(ContentError::InvalidLocation { offset, len });
        }
        Ok(StoreView::contiguous(&self.data[offset..end]))
    }
}
