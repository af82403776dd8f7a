//! Conversion functions between storage modes and representations

use ndarray::Array2;

use crate::matrix::{SparseMatrixCSC, SparsePattern};
use crate::utils::exclusive_scan;

impl SparsePattern {
    /// Drops empty columns and lists the remaining ones in `col_ids`
    ///
    /// Entry order is unchanged, so values stored against this pattern stay
    /// valid. A pattern already in hypersparse mode is returned as a copy.
    pub fn to_hypersparse(&self) -> SparsePattern {
        if self.is_hypersparse() {
            return self.clone();
        }

        let mut col_ids = Vec::new();
        let mut col_ptr = vec![0];
        for j in 0..self.n_cols {
            let range = self.vector_range(j);
            if !range.is_empty() {
                col_ids.push(j);
                col_ptr.push(range.end);
            }
        }

        let mut out = SparsePattern::new_hyper(
            self.n_rows,
            self.n_cols,
            col_ids,
            col_ptr,
            self.row_idx.clone(),
        );
        if !self.is_finalized() {
            out.mark_pending();
        }
        out
    }

    /// Expands the pattern to one vector slot per column
    pub fn to_sparse(&self) -> SparsePattern {
        let ids = match &self.col_ids {
            None => return self.clone(),
            Some(ids) => ids,
        };

        let mut col_ptr = vec![0; self.n_cols + 1];
        for (slot, &j) in ids.iter().enumerate() {
            col_ptr[j + 1] = self.vector_range(slot).len();
        }
        for j in 0..self.n_cols {
            col_ptr[j + 1] += col_ptr[j];
        }

        let mut out = SparsePattern::new(self.n_rows, self.n_cols, col_ptr, self.row_idx.clone());
        if !self.is_finalized() {
            out.mark_pending();
        }
        out
    }
}

impl<T: Copy> SparseMatrixCSC<T> {
    /// Same matrix in hypersparse storage mode
    pub fn to_hypersparse(&self) -> SparseMatrixCSC<T> {
        SparseMatrixCSC {
            pattern: self.pattern.to_hypersparse(),
            values: self.values.clone(),
        }
    }

    /// Same matrix in sparse storage mode
    pub fn to_sparse(&self) -> SparseMatrixCSC<T> {
        SparseMatrixCSC {
            pattern: self.pattern.to_sparse(),
            values: self.values.clone(),
        }
    }

    /// Dense copy with `fill` at every position the pattern does not store
    pub fn to_dense(&self, fill: T) -> Array2<T> {
        let mut dense = Array2::from_elem((self.n_rows(), self.n_cols()), fill);
        for (i, j, v) in self.triplets() {
            dense[[i, j]] = v;
        }
        dense
    }

    /// Builds a sparse-mode matrix from `(row, col, value)` triples
    ///
    /// Triples may come in any order. Duplicate positions are folded with
    /// `combine` in input order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds, or if duplicates are present
    /// and `combine` is `None`.
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        triplets: &[(usize, usize, T)],
        combine: Option<&dyn Fn(T, T) -> T>,
    ) -> Self {
        // Count entries per column
        let mut col_counts = vec![0; n_cols];
        for &(i, j, _) in triplets {
            assert!(i < n_rows, "Row index {} out of bounds (n_rows = {})", i, n_rows);
            assert!(j < n_cols, "Column index {} out of bounds (n_cols = {})", j, n_cols);
            col_counts[j] += 1;
        }
        let col_start = exclusive_scan(&col_counts);

        // Bucket by column, preserving input order within a column
        let mut next = col_start.clone();
        let mut bucket: Vec<Option<(usize, T)>> = vec![None; triplets.len()];
        for &(i, j, v) in triplets {
            bucket[next[j]] = Some((i, v));
            next[j] += 1;
        }

        let mut col_ptr = Vec::with_capacity(n_cols + 1);
        let mut row_idx = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        col_ptr.push(0);

        for j in 0..n_cols {
            let mut column: Vec<(usize, T)> = bucket[col_start[j]..col_start[j + 1]]
                .iter()
                .flatten()
                .copied()
                .collect();
            // stable, so duplicates keep input order
            column.sort_by_key(|&(i, _)| i);

            for (i, v) in column {
                if row_idx.len() > col_ptr[j] && row_idx.last() == Some(&i) {
                    let f = combine.unwrap_or_else(|| {
                        panic!("duplicate entry at ({}, {})", i, j)
                    });
                    if let Some(last) = values.last_mut() {
                        *last = f(*last, v);
                    }
                } else {
                    row_idx.push(i);
                    values.push(v);
                }
            }
            col_ptr.push(row_idx.len());
        }

        Self::new(n_rows, n_cols, col_ptr, row_idx, values)
    }
}
