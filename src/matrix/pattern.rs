//! Compressed-column nonzero pattern shared by typed and opaque matrices
//!
//! A pattern stores `nvec` vectors. In sparse mode vector slot `j` is column
//! `j` and `nvec == n_cols`. In hypersparse mode only nonempty columns are
//! stored and `col_ids[slot]` names the column held by each slot.

use std::ops::Range;

use crate::error::{Result, SpgemmError};

/// How the vectors of a pattern are addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Every column has a slot, addressed directly
    Sparse,
    /// Only listed columns have a slot, addressed through the column-id list
    Hypersparse,
}

/// Nonzero structure of a compressed-column matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsePattern {
    /// Number of rows (vector length)
    pub n_rows: usize,

    /// Number of columns (vector dimension)
    pub n_cols: usize,

    /// Vector pointers (size: nvec + 1)
    pub col_ptr: Vec<usize>,

    /// Column id of each stored vector, present iff hypersparse (size: nvec)
    pub col_ids: Option<Vec<usize>>,

    /// Row indices (size: nnz), strictly increasing within each vector
    pub row_idx: Vec<usize>,

    finalized: bool,
}

impl SparsePattern {
    /// Creates a sparse-mode pattern
    ///
    /// # Panics
    ///
    /// Panics if `col_ptr.len() != n_cols + 1` or `col_ptr[n_cols] != row_idx.len()`.
    pub fn new(n_rows: usize, n_cols: usize, col_ptr: Vec<usize>, row_idx: Vec<usize>) -> Self {
        assert_eq!(col_ptr.len(), n_cols + 1, "col_ptr.len() must be n_cols + 1");
        assert_eq!(
            col_ptr[n_cols],
            row_idx.len(),
            "col_ptr[n_cols] must equal row_idx.len()"
        );

        Self {
            n_rows,
            n_cols,
            col_ptr,
            col_ids: None,
            row_idx,
            finalized: true,
        }
    }

    /// Creates a hypersparse-mode pattern
    ///
    /// # Panics
    ///
    /// Panics if `col_ptr.len() != col_ids.len() + 1` or the last pointer
    /// does not equal `row_idx.len()`.
    pub fn new_hyper(
        n_rows: usize,
        n_cols: usize,
        col_ids: Vec<usize>,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
    ) -> Self {
        assert_eq!(
            col_ptr.len(),
            col_ids.len() + 1,
            "col_ptr.len() must be col_ids.len() + 1"
        );
        assert_eq!(
            col_ptr[col_ids.len()],
            row_idx.len(),
            "col_ptr[nvec] must equal row_idx.len()"
        );

        Self {
            n_rows,
            n_cols,
            col_ptr,
            col_ids: Some(col_ids),
            row_idx,
            finalized: true,
        }
    }

    /// Builds a sparse-mode pattern from the sorted row lists of each column
    pub fn from_columns(n_rows: usize, columns: &[Vec<usize>]) -> Self {
        let mut col_ptr = Vec::with_capacity(columns.len() + 1);
        let mut row_idx = Vec::new();
        col_ptr.push(0);
        for rows in columns {
            row_idx.extend_from_slice(rows);
            col_ptr.push(row_idx.len());
        }
        Self::new(n_rows, columns.len(), col_ptr, row_idx)
    }

    /// Creates a pattern with no entries
    pub fn empty(n_rows: usize, n_cols: usize) -> Self {
        Self::new(n_rows, n_cols, vec![0; n_cols + 1], Vec::new())
    }

    /// Number of stored vectors
    #[inline]
    pub fn nvec(&self) -> usize {
        self.col_ptr.len() - 1
    }

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.row_idx.len()
    }

    #[inline]
    pub fn is_hypersparse(&self) -> bool {
        self.col_ids.is_some()
    }

    pub fn storage_mode(&self) -> StorageMode {
        if self.is_hypersparse() {
            StorageMode::Hypersparse
        } else {
            StorageMode::Sparse
        }
    }

    /// Entry range of the vector stored in `slot`
    #[inline]
    pub fn vector_range(&self, slot: usize) -> Range<usize> {
        self.col_ptr[slot]..self.col_ptr[slot + 1]
    }

    /// Column id of the vector stored in `slot`
    #[inline]
    pub fn vector_id(&self, slot: usize) -> usize {
        match &self.col_ids {
            Some(ids) => ids[slot],
            None => slot,
        }
    }

    /// Row id at entry position `p`
    #[inline]
    pub fn row(&self, p: usize) -> usize {
        self.row_idx[p]
    }

    /// Slot holding column `j`, if any. Full binary search in hypersparse mode.
    pub fn slot_of(&self, j: usize) -> Option<usize> {
        match &self.col_ids {
            Some(ids) => ids.binary_search(&j).ok(),
            None if j < self.n_cols => Some(j),
            None => None,
        }
    }

    /// Entry range of column `j`; empty when the column has no stored vector
    pub fn column_range(&self, j: usize) -> Range<usize> {
        match self.slot_of(j) {
            Some(slot) => self.vector_range(slot),
            None => 0..0,
        }
    }

    /// Row indices of column `j`
    pub fn column_rows(&self, j: usize) -> &[usize] {
        &self.row_idx[self.column_range(j)]
    }

    /// Whether no mutation is pending on this pattern
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Flags the pattern as carrying pending work
    pub fn mark_pending(&mut self) {
        self.finalized = false;
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Verifies every structural invariant of a compressed-column pattern
    ///
    /// `matrix` names the operand in the returned error.
    pub fn check(&self, matrix: &'static str) -> Result<()> {
        let invalid = |reason: String| SpgemmError::InvalidPattern { matrix, reason };

        if self.col_ptr.is_empty() {
            return Err(invalid("col_ptr is empty".into()));
        }
        if self.col_ptr[0] != 0 {
            return Err(invalid(format!("col_ptr[0] is {}", self.col_ptr[0])));
        }
        let nvec = self.nvec();
        if self.col_ptr[nvec] != self.row_idx.len() {
            return Err(invalid(format!(
                "col_ptr[{}] is {} but {} row indices are stored",
                nvec,
                self.col_ptr[nvec],
                self.row_idx.len()
            )));
        }

        match &self.col_ids {
            None if nvec != self.n_cols => {
                return Err(invalid(format!(
                    "sparse pattern stores {} vectors for {} columns",
                    nvec, self.n_cols
                )));
            }
            Some(ids) => {
                if ids.len() != nvec {
                    return Err(invalid(format!(
                        "{} column ids for {} vectors",
                        ids.len(),
                        nvec
                    )));
                }
                if let Some(w) = ids.windows(2).find(|w| w[0] >= w[1]) {
                    return Err(invalid(format!(
                        "column ids not strictly increasing at {} -> {}",
                        w[0], w[1]
                    )));
                }
                if let Some(&last) = ids.last() {
                    if last >= self.n_cols {
                        return Err(invalid(format!(
                            "column id {} out of bounds (n_cols = {})",
                            last, self.n_cols
                        )));
                    }
                }
            }
            None => {}
        }

        for slot in 0..nvec {
            let (start, end) = (self.col_ptr[slot], self.col_ptr[slot + 1]);
            if start > end || end > self.row_idx.len() {
                return Err(invalid(format!("col_ptr not monotonic at slot {}", slot)));
            }
            let rows = &self.row_idx[start..end];
            if let Some(w) = rows.windows(2).find(|w| w[0] >= w[1]) {
                return Err(invalid(format!(
                    "rows of vector {} not strictly increasing at {} -> {}",
                    slot, w[0], w[1]
                )));
            }
            if let Some(&last) = rows.last() {
                if last >= self.n_rows {
                    return Err(invalid(format!(
                        "row index {} out of bounds (n_rows = {})",
                        last, self.n_rows
                    )));
                }
            }
        }

        Ok(())
    }
}
