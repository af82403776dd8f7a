//! Entry points: contract checks, then one kernel run over a slot range

use std::ops::Range;

use tracing::debug;

use crate::accumulator::{NumericOps, OpaqueWorkspace, TypedOps, Workspace};
use crate::error::{Result, SpgemmError};
use crate::kernel::{accumulate_columns, output_position, KernelInputs, KernelStats, Mask};
use crate::matrix::config::SpgemmConfig;
use crate::matrix::csc::SparseMatrixCSC;
use crate::matrix::opaque::OpaqueMatrix;
use crate::matrix::pattern::SparsePattern;
use crate::semiring::{OpaqueSemiring, Semiring};

/// Computes the values of C = A·B over C's existing pattern
///
/// C's pattern must come from a symbolic phase: finalized, with
/// `n_rows(C) = n_rows(A)`, `n_cols(C) = n_cols(B)`, `n_cols(A) = n_rows(B)`
/// and no more vectors than B. Only `c.values` is written; every stored
/// position ends up holding its accumulated product, or the identity when
/// nothing contributes to it.
///
/// The workspace needs at least `n_rows(C)` slots. Its contents are never
/// read before being written, so it can be reused across calls as is.
///
/// # Errors
///
/// Returns an error, before writing anything, if a precondition does not
/// hold. The values of C must not be relied upon after an error.
///
/// # Examples
///
/// ```
/// use gustavson::{spgemm_numeric, PlusTimes, SparseMatrixCSC, SpgemmConfig, Workspace};
///
/// let a = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1.0)], vec![(1, 2.0)]]);
/// let b = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1.0)], vec![(0, 1.0), (1, 1.0)]]);
///
/// // Pattern of the product, as the symbolic phase would produce it
/// let pattern = gustavson::SparsePattern::from_columns(2, &[vec![0], vec![0, 1]]);
/// let mut c = SparseMatrixCSC::with_pattern(pattern, 0.0);
///
/// let semiring = PlusTimes::<f64>::new();
/// let mut w = Workspace::for_semiring(&semiring, 2);
/// spgemm_numeric(&mut c, &a, &b, &semiring, &mut w, &SpgemmConfig::default()).unwrap();
///
/// assert_eq!(c.values, vec![1.0, 1.0, 2.0]);
/// ```
pub fn spgemm_numeric<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    workspace: &mut Workspace<S::Output>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    let slots = 0..b.nvec();
    run_typed(c, a, b, semiring, workspace, slots, None, config)
}

/// [`spgemm_numeric`] restricted to the output positions `mask` admits
///
/// Positions of C's pattern the mask rejects are set to the identity.
pub fn spgemm_numeric_masked<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    mask: &Mask<'_>,
    workspace: &mut Workspace<S::Output>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    let slots = 0..b.nvec();
    run_typed(c, a, b, semiring, workspace, slots, Some(mask), config)
}

/// [`spgemm_numeric`] for one partition: the columns held by B's vector
/// slots `slots`
///
/// Values of C outside those columns are left untouched.
pub fn spgemm_numeric_range<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    workspace: &mut Workspace<S::Output>,
    slots: Range<usize>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    run_typed(c, a, b, semiring, workspace, slots, None, config)
}

/// Byte-oblivious counterpart of [`spgemm_numeric`]
pub fn spgemm_numeric_opaque(
    c: &mut OpaqueMatrix,
    a: &OpaqueMatrix,
    b: &OpaqueMatrix,
    semiring: &OpaqueSemiring,
    workspace: &mut OpaqueWorkspace,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    run_opaque(c, a, b, semiring, workspace, None, config)
}

/// Byte-oblivious counterpart of [`spgemm_numeric_masked`]
pub fn spgemm_numeric_opaque_masked(
    c: &mut OpaqueMatrix,
    a: &OpaqueMatrix,
    b: &OpaqueMatrix,
    semiring: &OpaqueSemiring,
    mask: &Mask<'_>,
    workspace: &mut OpaqueWorkspace,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    run_opaque(c, a, b, semiring, workspace, Some(mask), config)
}

#[allow(clippy::too_many_arguments)]
fn run_typed<S: Semiring>(
    c: &mut SparseMatrixCSC<S::Output>,
    a: &SparseMatrixCSC<S::Left>,
    b: &SparseMatrixCSC<S::Right>,
    semiring: &S,
    workspace: &mut Workspace<S::Output>,
    slots: Range<usize>,
    mask: Option<&Mask<'_>>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    check_value_len("A", a.values.len(), a.pattern.nnz())?;
    check_value_len("B", b.values.len(), b.pattern.nnz())?;
    check_value_len("C", c.values.len(), c.pattern.nnz())?;

    let SparseMatrixCSC { pattern, values } = c;
    execute(
        semiring.name(),
        &TypedOps(semiring),
        pattern,
        values.as_mut_slice(),
        (&a.pattern, a.values.as_slice()),
        (&b.pattern, b.values.as_slice()),
        mask,
        workspace,
        slots,
        config,
    )
}

fn run_opaque(
    c: &mut OpaqueMatrix,
    a: &OpaqueMatrix,
    b: &OpaqueMatrix,
    semiring: &OpaqueSemiring,
    workspace: &mut OpaqueWorkspace,
    mask: Option<&Mask<'_>>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    check_elem_size("A", semiring.left_size(), a.elem_size)?;
    check_elem_size("B", semiring.right_size(), b.elem_size)?;
    check_elem_size("C", semiring.output_size(), c.elem_size)?;
    check_elem_size("workspace", semiring.output_size(), workspace.elem_size())?;
    check_value_len("A", a.values.len(), a.pattern.nnz() * a.elem_size)?;
    check_value_len("B", b.values.len(), b.pattern.nnz() * b.elem_size)?;
    check_value_len("C", c.values.len(), c.pattern.nnz() * c.elem_size)?;

    let slots = 0..b.pattern.nvec();
    let OpaqueMatrix { pattern, values, .. } = c;
    execute(
        semiring.name(),
        semiring,
        pattern,
        values.as_mut_slice(),
        (&a.pattern, a.values.as_slice()),
        (&b.pattern, b.values.as_slice()),
        mask,
        workspace,
        slots,
        config,
    )
}

#[allow(clippy::too_many_arguments)]
fn execute<O: NumericOps>(
    name: &str,
    ops: &O,
    c: &SparsePattern,
    cx: &mut O::OutputValues,
    (a, ax): (&SparsePattern, &O::LeftValues),
    (b, bx): (&SparsePattern, &O::RightValues),
    mask: Option<&Mask<'_>>,
    work: &mut O::Work,
    slots: Range<usize>,
    config: &SpgemmConfig,
) -> Result<KernelStats> {
    validate_operands(c, a, b, mask, config)?;
    check_slots(&slots, b)?;
    let required = c.n_rows;
    let len = ops.work_len(work);
    if len < required {
        return Err(SpgemmError::WorkspaceTooSmall { len, required });
    }

    debug!(
        semiring = name,
        rows = c.n_rows,
        cols = c.n_cols,
        a_nnz = a.nnz(),
        b_nnz = b.nnz(),
        c_nnz = c.nnz(),
        a_mode = ?a.storage_mode(),
        b_mode = ?b.storage_mode(),
        masked = mask.is_some(),
        slots = ?slots,
        "numeric spgemm"
    );

    let inputs = KernelInputs::<O> {
        a,
        ax,
        b,
        bx,
        c,
        mask,
        locator: config.locator,
    };
    let stats = accumulate_columns(ops, &inputs, slots, cx, 0, work);

    debug!(
        columns = stats.columns_computed,
        skipped = stats.columns_skipped,
        flops = stats.multiply_adds,
        "numeric spgemm done"
    );
    Ok(stats)
}

/// Contract checks shared by every driver
pub(crate) fn validate_operands(
    c: &SparsePattern,
    a: &SparsePattern,
    b: &SparsePattern,
    mask: Option<&Mask<'_>>,
    config: &SpgemmConfig,
) -> Result<()> {
    if !c.is_finalized() || !a.is_finalized() || !b.is_finalized() {
        return Err(SpgemmError::PatternNotFinalized);
    }
    if c.n_rows != a.n_rows {
        return Err(SpgemmError::DimensionMismatch(format!(
            "C has {} rows, A has {}",
            c.n_rows, a.n_rows
        )));
    }
    if c.n_cols != b.n_cols {
        return Err(SpgemmError::DimensionMismatch(format!(
            "C has {} columns, B has {}",
            c.n_cols, b.n_cols
        )));
    }
    if a.n_cols != b.n_rows {
        return Err(SpgemmError::DimensionMismatch(format!(
            "A has {} columns, B has {} rows",
            a.n_cols, b.n_rows
        )));
    }
    if c.nvec() > b.nvec() {
        return Err(SpgemmError::TooManyVectors {
            c_nvec: c.nvec(),
            b_nvec: b.nvec(),
        });
    }
    if let Some(mask) = mask {
        mask.check(c.n_rows, c.n_cols)?;
    }

    if config.check_patterns {
        a.check("A")?;
        b.check("B")?;
        c.check("C")?;
        if let Some(mask) = mask {
            mask.pattern().check("M")?;
        }
    }
    Ok(())
}

pub(crate) fn check_slots(slots: &Range<usize>, b: &SparsePattern) -> Result<()> {
    if slots.start > slots.end || slots.end > b.nvec() {
        return Err(SpgemmError::SlotRange {
            start: slots.start,
            end: slots.end,
            nvec: b.nvec(),
        });
    }
    Ok(())
}

pub(crate) fn check_value_len(matrix: &'static str, len: usize, nnz: usize) -> Result<()> {
    if len != nnz {
        return Err(SpgemmError::ValueLength { matrix, len, nnz });
    }
    Ok(())
}

fn check_elem_size(operand: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SpgemmError::ElementSize {
            operand,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Position range of C's values covered by B slots `slots`
pub(crate) fn output_span(
    c: &SparsePattern,
    b: &SparsePattern,
    slots: &Range<usize>,
) -> Range<usize> {
    output_position(c, b, slots.start)..output_position(c, b, slots.end)
}
