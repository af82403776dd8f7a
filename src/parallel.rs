//! # Parallel driver for the numeric SpGEMM kernel
//!
//! B's stored vectors are cut into contiguous slot ranges. Each range owns
//! the matching contiguous span of C's value array, so workers write
//! disjoint memory. Each rayon worker owns one workspace, allocated the
//! first time that worker picks up a partition and reused for every later
//! partition it runs.

use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::accumulator::{TypedOps, Workspace};
use crate::error::Result;
use crate::kernel::driver::{check_value_len, output_span, validate_operands};
use crate::kernel::{accumulate_columns, KernelInputs, KernelStats, Mask};
use crate::matrix::config::SpgemmConfig;
use crate::matrix::csc::SparseMatrixCSC;
use crate::semiring::Semiring;

/// Computes C's values over its existing pattern using rayon
///
/// Produces exactly the values [`crate::spgemm_numeric`] would: every
/// column is computed by one worker in the same ascending-`k` order.
///
/// # Examples
///
/// ```
/// use gustavson::{
///     reference_spgemm, spgemm_numeric_parallel, PlusTimes, SparseMatrixCSC, SpgemmConfig,
/// };
///
/// let a = SparseMatrixCSC::<f64>::identity(3);
/// let b = SparseMatrixCSC::from_columns(3, vec![vec![(0, 2.0)], vec![(1, 2.0)], vec![(2, 2.0)]]);
/// let semiring = PlusTimes::<f64>::new();
///
/// let mut c = reference_spgemm(&a, &b, &semiring);
/// let expected = c.values.clone();
///
/// let config = SpgemmConfig::default().with_threads(2);
/// spgemm_numeric_parallel(&mut c, &a, &b, &semiring, &config).unwrap();
/// assert_eq!(c.values, expected);
/// ```
pub fn spgemm_numeric_parallel<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    run_parallel(c, a, b, semiring, None, config)
}

/// Masked counterpart of [`spgemm_numeric_parallel`]
pub fn spgemm_numeric_parallel_masked<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    mask: &Mask<'_>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    run_parallel(c, a, b, semiring, Some(mask), config)
}

fn run_parallel<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    mask: Option<&Mask<'_>>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    check_value_len("A", a.values.len(), a.pattern.nnz())?;
    check_value_len("B", b.values.len(), b.pattern.nnz())?;
    check_value_len("C", c.values.len(), c.pattern.nnz())?;
    validate_operands(&c.pattern, &a.pattern, &b.pattern, mask, config)?;

    let nvec = b.pattern.nvec();
    let n_tasks = config.task_count(nvec);
    let n_rows = c.pattern.n_rows;
    let n_workers = rayon::current_num_threads().max(1);

    debug!(
        semiring = semiring.name(),
        rows = n_rows,
        cols = c.pattern.n_cols,
        c_nnz = c.pattern.nnz(),
        b_nvec = nvec,
        tasks = n_tasks,
        workers = n_workers,
        "parallel numeric spgemm"
    );

    let SparseMatrixCSC { pattern: c_pattern, values: c_values } = c;
    let c_pattern = &*c_pattern;

    // 1. Cut B's slots into contiguous ranges and C's values to match
    let mut partitions = Vec::with_capacity(n_tasks);
    let mut rest: &mut [S::Output] = c_values.as_mut_slice();
    let mut consumed = 0;
    for t in 0..n_tasks {
        let slots = (t * nvec / n_tasks)..((t + 1) * nvec / n_tasks);
        let mut span = output_span(c_pattern, &b.pattern, &slots);
        if t == n_tasks - 1 {
            span.end = c_pattern.nnz();
        }
        // C positions ahead of B's first stored column belong to no task
        let (_, tail) = std::mem::take(&mut rest).split_at_mut(span.start - consumed);
        let (head, tail) = tail.split_at_mut(span.end - span.start);
        rest = tail;
        consumed = span.end;
        partitions.push((slots, span.start, head));
    }

    // 2. Run one kernel per partition
    let ops = TypedOps(semiring);
    let inputs = KernelInputs::<TypedOps<'_, S>> {
        a: &a.pattern,
        ax: a.values.as_slice(),
        b: &b.pattern,
        bx: b.values.as_slice(),
        c: c_pattern,
        mask,
        locator: config.locator,
    };

    // One lazily allocated workspace per worker thread of the current pool
    let workspaces: Vec<Mutex<Option<Workspace<S::Output>>>> =
        (0..n_workers).map(|_| Mutex::new(None)).collect();

    let stats = partitions
        .into_par_iter()
        .map(|(slots, base, cx)| {
            let worker = rayon::current_thread_index().unwrap_or(0) % n_workers;
            let mut guard = workspaces[worker]
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let work = guard.get_or_insert_with(|| Workspace::for_semiring(semiring, n_rows));
            trace!(worker, slots = ?slots, base, len = cx.len(), "partition");
            accumulate_columns(&ops, &inputs, slots, cx, base, work)
        })
        .reduce(KernelStats::default, |x, y| x + y);

    debug!(
        columns = stats.columns_computed,
        flops = stats.multiply_adds,
        "parallel numeric spgemm done"
    );
    Ok(stats)
}
