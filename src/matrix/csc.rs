//! Compressed Sparse Column (CSC) matrix with optional hypersparse storage

use std::fmt;
use num_traits::Num;

use crate::matrix::pattern::{SparsePattern, StorageMode};

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// The matrix is its nonzero [`SparsePattern`] plus one value per stored
/// entry, in pattern order. The pattern may be sparse (every column has a
/// vector slot) or hypersparse (only listed columns have one).
#[derive(Clone)]
pub struct SparseMatrixCSC<T> {
    /// Nonzero structure
    pub pattern: SparsePattern,

    /// Values (size: nnz)
    pub values: Vec<T>,
}

impl<T: Copy> SparseMatrixCSC<T> {
    /// Creates a new sparse-mode CSC matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `col_ptr` - Column pointers
    /// * `row_idx` - Row indices
    /// * `values` - Stored values
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - col_ptr.len() must be n_cols + 1
    /// - row_idx.len() must equal values.len()
    /// - col_ptr[n_cols] must equal row_idx.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_idx.len(), values.len(), "row_idx.len() must equal values.len()");
        assert_rows_in_bounds(&row_idx, n_rows);

        Self {
            pattern: SparsePattern::new(n_rows, n_cols, col_ptr, row_idx),
            values,
        }
    }

    /// Creates a new hypersparse CSC matrix; `col_ids` lists the stored columns
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`SparseMatrixCSC::new`], with
    /// `col_ptr.len()` equal to `col_ids.len() + 1`.
    pub fn new_hyper(
        n_rows: usize,
        n_cols: usize,
        col_ids: Vec<usize>,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_idx.len(), values.len(), "row_idx.len() must equal values.len()");
        assert_rows_in_bounds(&row_idx, n_rows);

        Self {
            pattern: SparsePattern::new_hyper(n_rows, n_cols, col_ids, col_ptr, row_idx),
            values,
        }
    }

    /// Builds a sparse-mode matrix from per-column `(row, value)` lists
    ///
    /// Each column's entries must already be sorted by row.
    pub fn from_columns(n_rows: usize, columns: Vec<Vec<(usize, T)>>) -> Self {
        let n_cols = columns.len();
        let mut col_ptr = Vec::with_capacity(n_cols + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();

        col_ptr.push(0);
        for column in columns {
            for (row, val) in column {
                row_idx.push(row);
                values.push(val);
            }
            col_ptr.push(row_idx.len());
        }

        Self::new(n_rows, n_cols, col_ptr, row_idx, values)
    }

    /// Allocates values for an existing pattern, every entry set to `fill`
    ///
    /// This is how an output matrix is prepared for the numeric phase.
    pub fn with_pattern(pattern: SparsePattern, fill: T) -> Self {
        let values = vec![fill; pattern.nnz()];
        Self { pattern, values }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            pattern: SparsePattern::empty(n_rows, n_cols),
            values: Vec::new(),
        }
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.pattern.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.pattern.n_cols
    }

    /// Returns the number of stored entries in the matrix
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn nvec(&self) -> usize {
        self.pattern.nvec()
    }

    #[inline]
    pub fn is_hypersparse(&self) -> bool {
        self.pattern.is_hypersparse()
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.pattern.storage_mode()
    }

    /// Value at entry position `p`
    #[inline]
    pub fn value(&self, p: usize) -> T {
        self.values[p]
    }

    /// Returns an iterator over the stored entries of column j
    ///
    /// Each item is a tuple (row_idx, value). A column without a stored
    /// vector yields nothing.
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols(), "Column index out of bounds");

        let range = self.pattern.column_range(j);

        self.pattern.row_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&row, val)| (row, val))
    }

    /// Collects the matrix as `(row, col, value)` triples in column-major order
    pub fn triplets(&self) -> Vec<(usize, usize, T)> {
        let mut out = Vec::with_capacity(self.nnz());
        for slot in 0..self.nvec() {
            let j = self.pattern.vector_id(slot);
            for p in self.pattern.vector_range(slot) {
                out.push((self.pattern.row(p), j, self.values[p]));
            }
        }
        out
    }
}

impl<T> SparseMatrixCSC<T>
where
    T: Copy + Num,
{
    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self::new(n, n, (0..=n).collect(), (0..n).collect(), vec![T::one(); n])
    }
}

impl<T: fmt::Debug + Copy> fmt::Debug for SparseMatrixCSC<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows(), self.n_cols())?;
        writeln!(f, "  storage: {:?}, nvec: {}", self.storage_mode(), self.nvec())?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the stored vectors
        let max_vecs_to_print = 5.min(self.nvec());

        if max_vecs_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for slot in 0..max_vecs_to_print {
                write!(f, "    col {}: ", self.pattern.vector_id(slot))?;
                let range = self.pattern.vector_range(slot);

                if range.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(range.len());

                    for p in range.start..(range.start + max_elements) {
                        write!(f, "({}, {:?}) ", self.pattern.row(p), self.values[p])?;
                    }

                    if range.len() > max_elements {
                        write!(f, "... ({} more)", range.len() - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.nvec() > max_vecs_to_print {
                writeln!(f, "    ... ({} more vectors)", self.nvec() - max_vecs_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

fn assert_rows_in_bounds(row_idx: &[usize], n_rows: usize) {
    for &row in row_idx {
        assert!(row < n_rows, "Row index {} out of bounds (n_rows = {})", row, n_rows);
    }
}
