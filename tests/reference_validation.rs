//! Validate the reference and the numeric kernel against sprs

mod common;

use common::random_matrix;
use gustavson::{
    from_sprs_csc, reference_spgemm, spgemm_numeric, to_sprs_csc, PlusTimes, SparseMatrixCSC,
    SpgemmConfig, Workspace,
};
use ndarray::Array2;
use sprs::CsMat;

/// Create a simple test matrix
fn create_test_matrix() -> SparseMatrixCSC<f64> {
    // Create a 4x4 matrix:
    // [1 2 0 0]
    // [0 3 4 0]
    // [0 0 5 6]
    // [7 0 0 8]
    let col_ptr = vec![0, 2, 4, 6, 8];
    let row_idx = vec![0, 3, 0, 1, 1, 2, 2, 3];
    let values = vec![1.0, 7.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0];

    SparseMatrixCSC::new(4, 4, col_ptr, row_idx, values)
}

fn assert_close(ours: &Array2<f64>, theirs: &Array2<f64>) {
    assert_eq!(ours.shape(), theirs.shape());
    for (x, y) in ours.iter().zip(theirs.iter()) {
        let scale = x.abs().max(y.abs()).max(1.0);
        assert!((x - y).abs() <= 1e-10 * scale, "{} vs {}", x, y);
    }
}

#[test]
fn test_reference_vs_sprs() {
    let a = create_test_matrix();
    let b = create_test_matrix();

    // Compute with our reference implementation
    let result_ref = reference_spgemm(&a, &b, &PlusTimes::<f64>::new());

    // Compute with sprs
    let a_sprs: CsMat<f64> = to_sprs_csc(&a);
    let b_sprs: CsMat<f64> = to_sprs_csc(&b);
    let result_sprs = &a_sprs * &b_sprs;

    assert_close(&result_ref.to_dense(0.0), &result_sprs.to_dense());

    // [1 2 0 0]^2 row 0 = [1, 8, 8, 0]
    let dense = result_ref.to_dense(0.0);
    assert_eq!(dense.row(0).to_vec(), vec![1.0, 8.0, 8.0, 0.0]);
}

#[test]
fn test_kernel_vs_sprs_random() {
    for seed in 0..4 {
        let a = random_matrix(60, 45, 0.8, 0.1, 300 + seed);
        let b = random_matrix(45, 50, 0.8, 0.1, 400 + seed);
        let s = PlusTimes::<f64>::new();

        let pattern = reference_spgemm(&a, &b, &s).pattern;
        let mut c = SparseMatrixCSC::with_pattern(pattern, 0.0);
        let mut w = Workspace::for_semiring(&s, 60);
        let hyper_a = a.to_hypersparse();
        spgemm_numeric(&mut c, &hyper_a, &b, &s, &mut w, &SpgemmConfig::default()).unwrap();

        let product = &to_sprs_csc(&a) * &to_sprs_csc(&b);
        assert_close(&c.to_dense(0.0), &product.to_dense());
    }
}

#[test]
fn test_sprs_round_trip() {
    let a = random_matrix(30, 40, 0.3, 0.2, 500).to_hypersparse();
    let back = from_sprs_csc(to_sprs_csc(&a));

    assert!(!back.is_hypersparse());
    assert_eq!(back.pattern, a.pattern.to_sparse());
    assert_eq!(back.values, a.values);
}
