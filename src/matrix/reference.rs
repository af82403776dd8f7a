//! Reference implementation of semiring SpGEMM
//!
//! This provides a baseline for correctness testing. It fully resets a dense
//! accumulator for every output column and scans all of it to collect the
//! result, so its cost grows with `n_rows × n_cols`. Contributions are folded
//! in ascending `k` starting from the identity, which is the order the
//! numeric kernel uses, so results can be compared bit for bit.

use ndarray::Array1;

use crate::matrix::{SparseMatrixCSC, SparsePattern};
use crate::semiring::Semiring;

/// Dense accumulator for one column of A·B
struct DenseColumn<T> {
    values: Array1<T>,
    touched: Array1<bool>,
}

impl<T: Copy> DenseColumn<T> {
    fn new(n_rows: usize, identity: T) -> Self {
        Self {
            values: Array1::from_elem(n_rows, identity),
            touched: Array1::from_elem(n_rows, false),
        }
    }

    /// Recomputes the buffer as column `j` of A·B
    fn compute<S>(
        &mut self,
        a: &SparseMatrixCSC<S::Left>,
        b: &SparseMatrixCSC<S::Right>,
        semiring: &S,
        j: usize,
    ) where
        S: Semiring<Output = T>,
    {
        self.values.fill(semiring.identity());
        self.touched.fill(false);

        for (k, &b_val) in b.col_iter(j) {
            for (i, &a_val) in a.col_iter(k) {
                let t = semiring.multiply(a_val, b_val);
                self.values[i] = semiring.accumulate(self.values[i], t);
                self.touched[i] = true;
            }
        }
    }
}

/// Computes A·B under `semiring`, structure included
///
/// The result is in sparse storage mode and stores exactly the positions
/// that received at least one contribution, even when the accumulated value
/// equals the identity.
pub fn reference_spgemm<S: Semiring>(
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
) -> SparseMatrixCSC<S::Output> {
    assert_eq!(
        a.n_cols(), b.n_rows(),
        "Matrix dimensions must be compatible for multiplication"
    );

    let n_rows = a.n_rows();
    let n_cols = b.n_cols();

    let mut col_ptr = Vec::with_capacity(n_cols + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();
    col_ptr.push(0);

    let mut column = DenseColumn::new(n_rows, semiring.identity());
    for j in 0..n_cols {
        column.compute(a, b, semiring, j);
        for i in 0..n_rows {
            if column.touched[i] {
                row_idx.push(i);
                values.push(column.values[i]);
            }
        }
        col_ptr.push(row_idx.len());
    }

    SparseMatrixCSC::new(n_rows, n_cols, col_ptr, row_idx, values)
}

/// Values of A·B at every position of `pattern`, in pattern order
///
/// Positions no product reaches read as the identity. `pattern` may be in
/// either storage mode and may store more positions than the product has.
pub fn reference_values<S: Semiring>(
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    pattern: &SparsePattern,
) -> Vec<S::Output> {
    assert_eq!(pattern.n_rows, a.n_rows(), "pattern rows must match A");
    assert_eq!(pattern.n_cols, b.n_cols(), "pattern columns must match B");

    let mut out = Vec::with_capacity(pattern.nnz());
    let mut column = DenseColumn::new(a.n_rows(), semiring.identity());
    for slot in 0..pattern.nvec() {
        let j = pattern.vector_id(slot);
        column.compute(a, b, semiring, j);
        for p in pattern.vector_range(slot) {
            out.push(column.values[pattern.row(p)]);
        }
    }
    out
}
