//! Shared matrix generators for the integration tests

#![allow(dead_code)]

use gustavson::{SparseMatrixCSC, SparsePattern};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate a matrix where a `col_fill` fraction of the columns are nonempty
/// and each nonempty column holds about `density * n_rows` entries
pub fn random_matrix(
    n_rows: usize,
    n_cols: usize,
    col_fill: f64,
    density: f64,
    seed: u64,
) -> SparseMatrixCSC<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_columns(&mut rng, n_rows, n_cols, col_fill, density, |rng| {
        rng.gen_range(-10.0..10.0)
    })
}

/// Same as [`random_matrix`] with small integer values
pub fn random_int_matrix(
    n_rows: usize,
    n_cols: usize,
    col_fill: f64,
    density: f64,
    seed: u64,
) -> SparseMatrixCSC<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_columns(&mut rng, n_rows, n_cols, col_fill, density, |rng| {
        rng.gen_range(-20..=20)
    })
}

fn random_columns<T: Copy>(
    rng: &mut ChaCha8Rng,
    n_rows: usize,
    n_cols: usize,
    col_fill: f64,
    density: f64,
    mut value: impl FnMut(&mut ChaCha8Rng) -> T,
) -> SparseMatrixCSC<T> {
    let mut columns = Vec::with_capacity(n_cols);
    for _ in 0..n_cols {
        let mut column = Vec::new();
        if rng.gen_bool(col_fill) {
            for i in 0..n_rows {
                if rng.gen_bool(density) {
                    column.push((i, value(rng)));
                }
            }
        }
        columns.push(column);
    }
    SparseMatrixCSC::from_columns(n_rows, columns)
}

/// Adds random extra rows to every nonempty column of a sparse-mode pattern
pub fn overapproximate(pattern: &SparsePattern, extra: f64, seed: u64) -> SparsePattern {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let columns: Vec<Vec<usize>> = (0..pattern.n_cols)
        .map(|j| {
            let rows = pattern.column_rows(j);
            if rows.is_empty() {
                return Vec::new();
            }
            (0..pattern.n_rows)
                .filter(|i| rows.binary_search(i).is_ok() || rng.gen_bool(extra))
                .collect()
        })
        .collect();
    SparsePattern::from_columns(pattern.n_rows, &columns)
}

/// Bit patterns of float values, for exact comparisons
pub fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}
