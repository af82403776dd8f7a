//! Utilities for converting between our matrix formats and external libraries

use crate::matrix::SparseMatrixCSC;
use sprs::CsMat;
use num_traits::Num;

/// Converts our CSC matrix format to sprs CsMat format (as CSC)
///
/// sprs has no hypersparse mode, so hypersparse matrices are expanded to one
/// pointer per column first.
pub fn to_sprs_csc<T>(matrix: &SparseMatrixCSC<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    let sparse = matrix.to_sparse();
    let SparseMatrixCSC { pattern, values } = sparse;

    CsMat::new_csc(
        (pattern.n_rows, pattern.n_cols),
        pattern.col_ptr,
        pattern.row_idx,
        values,
    )
}

/// Converts sprs CsMat to our SparseMatrixCSC format in sparse mode
pub fn from_sprs_csc<T>(matrix: CsMat<T>) -> SparseMatrixCSC<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSC format
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSC::new(
        shape.0,
        shape.1,
        indptr,
        indices,
        data,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;

    #[test]
    fn test_hyper_to_sprs() {
        let hyper = SparseMatrixCSC::new_hyper(
            3,
            6,
            vec![1, 4],
            vec![0, 1, 3],
            vec![2, 0, 1],
            vec![1.0, 2.0, 3.0],
        );
        let csc = to_sprs_csc(&hyper);

        assert_eq!(csc.shape(), (3, 6));
        assert_eq!(csc.nnz(), 3);
        assert_eq!(csc.get(2, 1), Some(&1.0));
        assert_eq!(csc.get(1, 4), Some(&3.0));
        assert_eq!(csc.get(0, 0), None);
    }

    #[test]
    fn test_from_sprs_csr_input() {
        let mut tri = TriMat::new((2, 3));
        tri.add_triplet(0, 2, 5);
        tri.add_triplet(1, 0, 7);
        let csr: CsMat<i32> = tri.to_csr();

        let ours = from_sprs_csc(csr);
        assert_eq!(ours.pattern.col_ptr, vec![0, 1, 1, 2]);
        assert_eq!(ours.pattern.row_idx, vec![1, 0]);
        assert_eq!(ours.values, vec![7, 5]);
    }
}
