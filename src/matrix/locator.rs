//! Windowed lookup of vectors in a hypersparse column-id list
//!
//! Within one output column the row ids of B are visited in increasing
//! order, so every lookup of A's column `k` can start where the previous one
//! stopped. The window `[left, right)` only ever shrinks during a column and
//! is reset when the next column starts.

use std::ops::Range;

use crate::matrix::pattern::SparsePattern;

/// Whether successive lookups share a shrinking window or search everything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocatorMode {
    /// Reuse the left bound between lookups and trim the right bound per column
    #[default]
    Trimmed,
    /// Search the whole column-id list on every lookup
    FullRange,
}

/// Search window over a hypersparse column-id list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorLocator {
    left: usize,
    right: usize,
    len: usize,
    mode: LocatorMode,
}

impl VectorLocator {
    /// Creates a locator over a column-id list of `len` entries
    pub fn new(len: usize, mode: LocatorMode) -> Self {
        Self {
            left: 0,
            right: len,
            len,
            mode,
        }
    }

    /// Creates a locator for the vectors stored in `pattern`
    pub fn for_pattern(pattern: &SparsePattern, mode: LocatorMode) -> Self {
        Self::new(pattern.nvec(), mode)
    }

    /// Restores the full window
    #[inline]
    pub fn reset(&mut self) {
        self.left = 0;
        self.right = self.len;
    }

    /// Current window as a slot range
    #[inline]
    pub fn window(&self) -> Range<usize> {
        self.left..self.right
    }

    #[inline]
    pub fn mode(&self) -> LocatorMode {
        self.mode
    }

    /// Finds the slot holding `column` in `ids`
    ///
    /// On return the left bound sits at the slot found, or at the insertion
    /// point when `column` is absent.
    #[inline]
    pub fn locate(&mut self, ids: &[usize], column: usize) -> Option<usize> {
        if self.mode == LocatorMode::FullRange {
            self.reset();
        }
        if self.left >= self.right {
            return None;
        }

        match ids[self.left..self.right].binary_search(&column) {
            Ok(offset) => {
                self.left += offset;
                Some(self.left)
            }
            Err(offset) => {
                self.left += offset;
                None
            }
        }
    }

    /// Drops every slot whose column id exceeds `max_column` from the window
    pub fn trim_right(&mut self, ids: &[usize], max_column: usize) {
        if self.mode == LocatorMode::FullRange || self.left >= self.right {
            return;
        }
        if ids[self.right - 1] <= max_column {
            return;
        }
        let keep = ids[self.left..self.right].partition_point(|&id| id <= max_column);
        self.right = self.left + keep;
    }

    /// Entry range of column `k` of `pattern`, empty when it stores no vector
    ///
    /// Sparse patterns are indexed directly; hypersparse ones go through
    /// [`VectorLocator::locate`].
    #[inline]
    pub fn lookup(&mut self, pattern: &SparsePattern, k: usize) -> Range<usize> {
        match &pattern.col_ids {
            None => pattern.col_ptr[k]..pattern.col_ptr[k + 1],
            Some(ids) => match self.locate(ids, k) {
                Some(slot) => pattern.col_ptr[slot]..pattern.col_ptr[slot + 1],
                None => 0..0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [usize; 6] = [2, 5, 9, 14, 20, 31];

    #[test]
    fn test_locate_advances_left() {
        let mut loc = VectorLocator::new(IDS.len(), LocatorMode::Trimmed);

        assert_eq!(loc.locate(&IDS, 5), Some(1));
        assert_eq!(loc.window(), 1..6);

        assert_eq!(loc.locate(&IDS, 10), None);
        assert_eq!(loc.window(), 3..6);

        assert_eq!(loc.locate(&IDS, 20), Some(4));
        assert_eq!(loc.locate(&IDS, 40), None);
        assert_eq!(loc.window(), 6..6);
        assert_eq!(loc.locate(&IDS, 31), None);
    }

    #[test]
    fn test_trim_right() {
        let mut loc = VectorLocator::new(IDS.len(), LocatorMode::Trimmed);
        loc.trim_right(&IDS, 14);
        assert_eq!(loc.window(), 0..4);
        assert_eq!(loc.locate(&IDS, 20), None);

        loc.reset();
        loc.trim_right(&IDS, 1);
        assert_eq!(loc.window(), 0..0);

        loc.reset();
        loc.trim_right(&IDS, 100);
        assert_eq!(loc.window(), 0..6);
    }

    #[test]
    fn test_full_range_mode_ignores_window() {
        let mut loc = VectorLocator::new(IDS.len(), LocatorMode::FullRange);
        assert_eq!(loc.locate(&IDS, 20), Some(4));
        assert_eq!(loc.locate(&IDS, 2), Some(0));
        loc.trim_right(&IDS, 3);
        assert_eq!(loc.locate(&IDS, 31), Some(5));
    }

    #[test]
    fn test_trimmed_matches_full_range_on_increasing_lookups() {
        let columns = [0, 2, 3, 9, 10, 14, 15, 31];
        let mut trimmed = VectorLocator::new(IDS.len(), LocatorMode::Trimmed);
        let mut full = VectorLocator::new(IDS.len(), LocatorMode::FullRange);
        trimmed.trim_right(&IDS, 31);

        for k in columns {
            assert_eq!(trimmed.locate(&IDS, k), full.locate(&IDS, k), "column {}", k);
        }
    }

    #[test]
    fn test_empty_list() {
        let mut loc = VectorLocator::new(0, LocatorMode::Trimmed);
        loc.trim_right(&[], 3);
        assert_eq!(loc.locate(&[], 3), None);
    }

    #[test]
    fn test_lookup_sparse_and_hyper() {
        let sparse = SparsePattern::new(3, 3, vec![0, 1, 1, 3], vec![0, 1, 2]);
        let mut loc = VectorLocator::for_pattern(&sparse, LocatorMode::Trimmed);
        assert_eq!(loc.lookup(&sparse, 2), 1..3);
        assert!(loc.lookup(&sparse, 1).is_empty());

        let hyper = SparsePattern::new_hyper(3, 50, vec![4, 40], vec![0, 2, 3], vec![0, 2, 1]);
        let mut loc = VectorLocator::for_pattern(&hyper, LocatorMode::Trimmed);
        assert!(loc.lookup(&hyper, 3).is_empty());
        assert_eq!(loc.lookup(&hyper, 40), 2..3);
    }
}
