//! Basic tests for matrix construction, storage modes and conversions

use gustavson::{
    OpaqueMatrix, SparseMatrixCSC, SparsePattern, SpgemmError, StorageMode,
};

#[test]
fn test_matrix_creation_csc() {
    let matrix = SparseMatrixCSC::new(
        3,
        3,
        vec![0, 2, 4, 5],
        vec![0, 2, 0, 1, 2],
        vec![1.0, 4.0, 2.0, 3.0, 5.0],
    );

    assert_eq!(matrix.n_rows(), 3);
    assert_eq!(matrix.n_cols(), 3);
    assert_eq!(matrix.nnz(), 5);
    assert_eq!(matrix.nvec(), 3);
    assert_eq!(matrix.storage_mode(), StorageMode::Sparse);

    // Check first column
    let first_col: Vec<_> = matrix.col_iter(0).collect();
    assert_eq!(first_col.len(), 2);
    assert_eq!(first_col[0].0, 0);
    assert_eq!(*first_col[0].1, 1.0);
    assert_eq!(first_col[1].0, 2);
    assert_eq!(*first_col[1].1, 4.0);

    // Check third column
    let third_col: Vec<_> = matrix.col_iter(2).collect();
    assert_eq!(third_col, vec![(2, &5.0)]);
}

#[test]
fn test_hypersparse_creation() {
    // 5 x 1000 with only columns 10 and 999 stored
    let matrix = SparseMatrixCSC::new_hyper(
        5,
        1000,
        vec![10, 999],
        vec![0, 2, 3],
        vec![1, 4, 0],
        vec![1.5, 2.5, 3.5],
    );

    assert!(matrix.is_hypersparse());
    assert_eq!(matrix.nvec(), 2);
    assert_eq!(matrix.pattern.slot_of(999), Some(1));
    assert_eq!(matrix.col_iter(500).count(), 0);
    assert_eq!(matrix.triplets(), vec![(1, 10, 1.5), (4, 10, 2.5), (0, 999, 3.5)]);
    assert!(matrix.pattern.check("A").is_ok());
}

#[test]
fn test_storage_mode_round_trip() {
    let sparse = SparseMatrixCSC::from_columns(
        4,
        vec![vec![], vec![], vec![(1, 1), (3, 2)], vec![], vec![(0, 3)]],
    );

    let hyper = sparse.to_hypersparse();
    assert_eq!(hyper.storage_mode(), StorageMode::Hypersparse);
    assert_eq!(hyper.pattern.col_ids, Some(vec![2, 4]));
    assert_eq!(hyper.values, sparse.values);
    assert_eq!(hyper.to_dense(0), sparse.to_dense(0));

    let back = hyper.to_sparse();
    assert_eq!(back.pattern, sparse.pattern);
}

#[test]
fn test_pending_state_survives_conversion() {
    let mut pattern = SparsePattern::from_columns(2, &[vec![0], vec![]]);
    pattern.mark_pending();
    assert!(!pattern.to_hypersparse().is_finalized());
    assert!(!pattern.to_hypersparse().to_sparse().is_finalized());
}

#[test]
fn test_from_triplets() {
    let m = SparseMatrixCSC::from_triplets(
        3,
        2,
        &[(2, 1, 6.0), (0, 0, 1.0), (1, 1, 5.0), (0, 1, 4.0)],
        None,
    );
    assert_eq!(m.pattern.col_ptr, vec![0, 1, 4]);
    assert_eq!(m.pattern.row_idx, vec![0, 0, 1, 2]);
    assert_eq!(m.values, vec![1.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_pattern_checks() {
    let mut bad_ptr = SparsePattern::from_columns(3, &[vec![0, 1], vec![2]]);
    bad_ptr.col_ptr = vec![0, 3, 2];
    assert!(matches!(
        bad_ptr.check("B"),
        Err(SpgemmError::InvalidPattern { matrix: "B", .. })
    ));

    let hyper_out_of_range = SparsePattern::new_hyper(2, 4, vec![1, 4], vec![0, 1, 2], vec![0, 1]);
    assert!(hyper_out_of_range.check("A").is_err());
}

#[test]
fn test_opaque_matrix_from_typed() {
    let typed = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1u32), (1, 0x0102_0304)]]);
    let opaque = OpaqueMatrix::from_typed(&typed);

    assert_eq!(opaque.elem_size, 4);
    assert_eq!(opaque.nnz(), 2);
    assert_eq!(opaque.value_bytes(1), 0x0102_0304u32.to_ne_bytes());
    assert_eq!(opaque.to_typed::<u32>().values, typed.values);

    let filled = OpaqueMatrix::with_pattern(typed.pattern.clone(), &[9, 9, 9, 9]);
    assert_eq!(filled.values, vec![9; 8]);
}

mod glob_import {
    use gustavson::*;

    #[test]
    fn test_glob_import_resolves() {
        let a = SparseMatrixCSC::<f64>::identity(2);
        let c = reference_spgemm(&a, &a, &PlusTimes::<f64>::new());
        assert_eq!(c.values, vec![1.0, 1.0]);
        assert!(!VERSION.is_empty());
    }
}
