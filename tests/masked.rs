//! Tests for masked numeric SpGEMM

mod common;

use common::{bits, random_matrix};
use gustavson::{
    reference_spgemm, reference_values, spgemm_numeric_masked, spgemm_numeric_opaque_masked,
    spgemm_numeric_parallel_masked, Mask, OpaqueMatrix, OpaqueSemiring, OpaqueWorkspace,
    PlusTimes, SparseMatrixCSC, SparsePattern, SpgemmConfig, SpgemmError, Workspace,
};

fn config() -> SpgemmConfig {
    SpgemmConfig::default().with_pattern_checks(true)
}

/// Mask membership computed straight from the mask's pattern
fn admitted(
    mask: &SparsePattern,
    values: Option<&[bool]>,
    complement: bool,
    i: usize,
    j: usize,
) -> bool {
    let range = mask.column_range(j);
    let hit = match mask.row_idx[range.clone()].binary_search(&i) {
        Ok(offset) => values.map_or(true, |v| v[range.start + offset]),
        Err(_) => false,
    };
    hit != complement
}

#[test]
fn test_structural_and_complemented_mask() {
    let a = SparseMatrixCSC::<f64>::identity(3);
    let b = SparseMatrixCSC::from_columns(
        3,
        vec![vec![(0, 1.0), (1, 2.0), (2, 3.0)], vec![(0, 4.0), (1, 5.0), (2, 6.0)]],
    );
    let full = SparsePattern::from_columns(3, &[vec![0, 1, 2], vec![0, 1, 2]]);
    let mask_pattern = SparsePattern::from_columns(3, &[vec![0, 2], vec![1]]);
    let s = PlusTimes::<f64>::new();
    let mut w = Workspace::for_semiring(&s, 3);

    let mask = Mask::structural(&mask_pattern);
    let mut c = SparseMatrixCSC::with_pattern(full.clone(), -1.0);
    let stats = spgemm_numeric_masked(&mut c, &a, &b, &s, &mask, &mut w, &config()).unwrap();
    assert_eq!(c.values, vec![1.0, 0.0, 3.0, 0.0, 5.0, 0.0]);
    assert_eq!(stats.workspace_clears, 3);
    assert_eq!(stats.multiply_adds, 3);
    assert_eq!(stats.gathers, 6);

    let mut c = SparseMatrixCSC::with_pattern(full, -1.0);
    spgemm_numeric_masked(&mut c, &a, &b, &s, &mask.complemented(), &mut w, &config()).unwrap();
    assert_eq!(c.values, vec![0.0, 2.0, 0.0, 4.0, 0.0, 6.0]);
}

#[test]
fn test_valued_mask() {
    let a = SparseMatrixCSC::<f64>::identity(2);
    let b = SparseMatrixCSC::from_columns(2, vec![vec![(0, 7.0), (1, 8.0)]]);
    let pattern = SparsePattern::from_columns(2, &[vec![0, 1]]);
    let mask_pattern = pattern.clone();
    let mask_values = [false, true];
    let s = PlusTimes::<f64>::new();

    let mut c = SparseMatrixCSC::with_pattern(pattern, 0.0);
    let mut w = Workspace::for_semiring(&s, 2);
    let mask = Mask::valued(&mask_pattern, &mask_values);
    spgemm_numeric_masked(&mut c, &a, &b, &s, &mask, &mut w, &config()).unwrap();
    assert_eq!(c.values, vec![0.0, 8.0]);
}

#[test]
fn test_random_masks_match_filtered_reference() {
    let a = random_matrix(40, 40, 0.8, 0.1, 91);
    let b = random_matrix(40, 30, 0.9, 0.1, 92);
    let s = PlusTimes::<f64>::new();
    let exact = reference_spgemm(&a, &b, &s);
    let expected = reference_values(&a, &b, &s, &exact.pattern);

    let mask_matrix = random_matrix(40, 30, 0.7, 0.4, 93);
    let mask_values: Vec<bool> = mask_matrix.values.iter().map(|&v| v > 0.0).collect();
    let mut w = Workspace::for_semiring(&s, 40);

    let variants = [
        (None, false),
        (None, true),
        (Some(&mask_values[..]), false),
        (Some(&mask_values[..]), true),
    ];
    for (values, complement) in variants {
        let mut mask = match values {
            None => Mask::structural(&mask_matrix.pattern),
            Some(v) => Mask::valued(&mask_matrix.pattern, v),
        };
        if complement {
            mask = mask.complemented();
        }

        let mut c = SparseMatrixCSC::with_pattern(exact.pattern.clone(), f64::NAN);
        spgemm_numeric_masked(&mut c, &a, &b, &s, &mask, &mut w, &config()).unwrap();

        for (p, (i, j, _)) in exact.triplets().into_iter().enumerate() {
            let want = if admitted(&mask_matrix.pattern, values, complement, i, j) {
                expected[p]
            } else {
                0.0
            };
            assert_eq!(c.values[p].to_bits(), want.to_bits(), "({}, {})", i, j);
        }

        // the parallel and opaque drivers honour the same mask
        let mut pc = SparseMatrixCSC::with_pattern(exact.pattern.clone(), f64::NAN);
        let par_config = config().with_threads(3).with_min_slots_per_task(4);
        spgemm_numeric_parallel_masked(&mut pc, &a, &b, &s, &mask, &par_config).unwrap();
        assert_eq!(bits(&pc.values), bits(&c.values));

        let opaque = OpaqueSemiring::from_semiring(s);
        let mut oc = OpaqueMatrix::with_pattern(exact.pattern.clone(), opaque.identity());
        let mut ow = OpaqueWorkspace::new(&opaque, 40);
        spgemm_numeric_opaque_masked(
            &mut oc,
            &OpaqueMatrix::from_typed(&a),
            &OpaqueMatrix::from_typed(&b),
            &opaque,
            &mask,
            &mut ow,
            &config(),
        )
        .unwrap();
        assert_eq!(oc.values, OpaqueMatrix::from_typed(&c).values);
    }
}

#[test]
fn test_hypersparse_mask() {
    let a = SparseMatrixCSC::<f64>::identity(4);
    let b = SparseMatrixCSC::from_columns(4, vec![vec![(0, 1.0)], vec![(1, 2.0)], vec![(2, 3.0)]]);
    let pattern = SparsePattern::from_columns(4, &[vec![0], vec![1], vec![2]]);
    let mask_pattern = SparsePattern::new_hyper(4, 3, vec![1], vec![0, 1], vec![1]);
    let s = PlusTimes::<f64>::new();

    let mut c = SparseMatrixCSC::with_pattern(pattern, 9.0);
    let mut w = Workspace::for_semiring(&s, 4);
    let mask = Mask::structural(&mask_pattern);
    spgemm_numeric_masked(&mut c, &a, &b, &s, &mask, &mut w, &config()).unwrap();
    assert_eq!(c.values, vec![0.0, 2.0, 0.0]);
}

#[test]
fn test_mask_shape_mismatch_rejected() {
    let a = SparseMatrixCSC::<f64>::identity(2);
    let b = SparseMatrixCSC::<f64>::identity(2);
    let pattern = SparsePattern::from_columns(2, &[vec![0], vec![1]]);
    let wrong = SparsePattern::empty(3, 2);
    let s = PlusTimes::<f64>::new();

    let mut c = SparseMatrixCSC::with_pattern(pattern, 0.0);
    let mut w = Workspace::for_semiring(&s, 2);
    let mask = Mask::structural(&wrong);
    let err = spgemm_numeric_masked(&mut c, &a, &b, &s, &mask, &mut w, &config()).unwrap_err();
    assert!(matches!(err, SpgemmError::DimensionMismatch(_)));
}
