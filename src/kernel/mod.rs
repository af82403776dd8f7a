//! Numeric phase of Gustavson's SpGEMM over a precomputed output pattern
//!
//! For every stored vector `j` of B, column `j` of C is computed as
//! `C(:,j) = Σ_k A(:,k) ⊗ B(k,j)` by scattering into a dense workspace and
//! gathering back only the rows C's pattern names:
//!
//! 1. Skip the column outright when its C range is empty.
//! 2. Set the workspace to the identity at every row of C(:,j).
//! 3. When A is hypersparse and B(:,j) has more than two entries, trim A's
//!    column-id window to the last row id of B(:,j).
//! 4. For each `k` in B(:,j), ascending: find A(:,k) and fold
//!    `A(i,k) ⊗ B(k,j)` into the workspace at each `i`.
//! 5. Copy the workspace at every row of C(:,j) into C, in pattern order.
//!
//! The cost is proportional to the flops plus `nnz(C)`; nothing scales with
//! `n_rows(C)`.

pub mod driver;
pub mod mask;

use std::iter::Sum;
use std::ops::{Add, AddAssign, Range};

use crate::accumulator::NumericOps;
use crate::matrix::locator::{LocatorMode, VectorLocator};
use crate::matrix::pattern::SparsePattern;

pub use driver::{
    spgemm_numeric, spgemm_numeric_masked, spgemm_numeric_opaque, spgemm_numeric_opaque_masked,
    spgemm_numeric_range,
};
pub use mask::{Mask, MaskColumn};

/// Work counters reported by one kernel invocation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KernelStats {
    /// Output columns with a nonempty pattern
    pub columns_computed: usize,
    /// Output columns skipped because their pattern is empty
    pub columns_skipped: usize,
    /// Lookups of a column of A
    pub locate_calls: usize,
    /// Workspace slots reset to the identity
    pub workspace_clears: usize,
    /// Multiply-accumulate steps into the workspace
    pub multiply_adds: usize,
    /// Output values written
    pub gathers: usize,
}

impl KernelStats {
    /// Workspace slots written, clears and accumulations together
    pub fn workspace_writes(&self) -> usize {
        self.workspace_clears + self.multiply_adds
    }
}

impl AddAssign for KernelStats {
    fn add_assign(&mut self, rhs: Self) {
        self.columns_computed += rhs.columns_computed;
        self.columns_skipped += rhs.columns_skipped;
        self.locate_calls += rhs.locate_calls;
        self.workspace_clears += rhs.workspace_clears;
        self.multiply_adds += rhs.multiply_adds;
        self.gathers += rhs.gathers;
    }
}

impl Add for KernelStats {
    type Output = KernelStats;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sum for KernelStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Read-only operands of one multiply
pub(crate) struct KernelInputs<'a, O: NumericOps> {
    pub a: &'a SparsePattern,
    pub ax: &'a O::LeftValues,
    pub b: &'a SparsePattern,
    pub bx: &'a O::RightValues,
    pub c: &'a SparsePattern,
    pub mask: Option<&'a Mask<'a>>,
    pub locator: LocatorMode,
}

/// Walks C's vectors in step with the stored vectors of B
struct OutputCursor<'a> {
    c: &'a SparsePattern,
    next: usize,
}

impl<'a> OutputCursor<'a> {
    /// Positions the cursor at the first C vector with id >= `first_column`
    fn new(c: &'a SparsePattern, first_column: usize) -> Self {
        let next = match &c.col_ids {
            Some(ids) => ids.partition_point(|&id| id < first_column),
            None => 0,
        };
        Self { c, next }
    }

    /// Entry range of C(:,j); calls must come in increasing `j`
    #[inline]
    fn range(&mut self, j: usize) -> Range<usize> {
        match &self.c.col_ids {
            None => self.c.col_ptr[j]..self.c.col_ptr[j + 1],
            Some(ids) => {
                while self.next < ids.len() && ids[self.next] < j {
                    self.next += 1;
                }
                if self.next < ids.len() && ids[self.next] == j {
                    self.c.vector_range(self.next)
                } else {
                    0..0
                }
            }
        }
    }
}

/// Position in C's value array where the columns of B slot `slot` begin
pub(crate) fn output_position(c: &SparsePattern, b: &SparsePattern, slot: usize) -> usize {
    if slot >= b.nvec() {
        return c.nnz();
    }
    let j = b.vector_id(slot);
    match &c.col_ids {
        Some(ids) => c.col_ptr[ids.partition_point(|&id| id < j)],
        None => c.col_ptr[j],
    }
}

/// Computes C's values for the B vectors in `slots`
///
/// `cx` holds C's values starting at entry position `c_base`; only positions
/// of the columns in `slots` are written. Inputs must already be validated.
pub(crate) fn accumulate_columns<O: NumericOps>(
    ops: &O,
    inputs: &KernelInputs<'_, O>,
    slots: Range<usize>,
    cx: &mut O::OutputValues,
    c_base: usize,
    work: &mut O::Work,
) -> KernelStats {
    let KernelInputs {
        a,
        ax,
        b,
        bx,
        c,
        mask,
        locator,
    } = *inputs;

    let mut stats = KernelStats::default();
    if slots.is_empty() {
        return stats;
    }

    let mut a_locator = VectorLocator::for_pattern(a, locator);
    let mut c_cursor = OutputCursor::new(c, b.vector_id(slots.start));

    for slot in slots {
        let j = b.vector_id(slot);

        let pc_range = c_cursor.range(j);
        if pc_range.is_empty() {
            stats.columns_skipped += 1;
            continue;
        }

        let pb_range = b.vector_range(slot);
        debug_assert!(!pb_range.is_empty(), "C(:,{}) nonempty but B(:,{}) is empty", j, j);

        let m = mask.map(|m| m.column(j));
        let allows = |i: usize| m.as_ref().map_or(true, |m| m.allows(i));

        // clear w at the rows of C(:,j)
        for pc in pc_range.clone() {
            let i = c.row(pc);
            if allows(i) {
                ops.clear(work, i);
                stats.workspace_clears += 1;
            }
        }

        // trim A's column-id window past the last row of B(:,j)
        a_locator.reset();
        if let Some(ids) = a.col_ids.as_deref() {
            if pb_range.len() > 2 {
                a_locator.trim_right(ids, b.row(pb_range.end - 1));
            }
        }

        // w += A(:,k) * B(k,j)
        for pb in pb_range {
            let k = b.row(pb);
            let pa_range = a_locator.lookup(a, k);
            stats.locate_calls += 1;
            if pa_range.is_empty() {
                continue;
            }
            for pa in pa_range {
                let i = a.row(pa);
                if allows(i) {
                    ops.multiply_add(work, i, ax, pa, bx, pb);
                    stats.multiply_adds += 1;
                }
            }
        }

        // gather C(:,j) from w
        for pc in pc_range {
            let i = c.row(pc);
            if allows(i) {
                ops.gather(cx, pc - c_base, work, i);
            } else {
                ops.write_identity(cx, pc - c_base);
            }
            stats.gathers += 1;
        }

        stats.columns_computed += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::{TypedOps, Workspace};
    use crate::semiring::PlusTimes;

    #[test]
    fn test_output_cursor_hyper() {
        let c = SparsePattern::new_hyper(3, 10, vec![2, 7], vec![0, 1, 3], vec![0, 1, 2]);
        let mut cursor = OutputCursor::new(&c, 0);
        assert_eq!(cursor.range(1), 0..0);
        assert_eq!(cursor.range(2), 0..1);
        assert_eq!(cursor.range(5), 0..0);
        assert_eq!(cursor.range(7), 1..3);
        assert_eq!(cursor.range(9), 0..0);
    }

    #[test]
    fn test_output_position() {
        let b = SparsePattern::new_hyper(3, 10, vec![1, 4, 8], vec![0, 1, 2, 3], vec![0, 1, 2]);
        let c_sparse = SparsePattern::from_columns(
            3,
            &[vec![], vec![0], vec![], vec![], vec![1, 2], vec![], vec![], vec![], vec![0], vec![]],
        );
        assert_eq!(output_position(&c_sparse, &b, 0), 0);
        assert_eq!(output_position(&c_sparse, &b, 1), 1);
        assert_eq!(output_position(&c_sparse, &b, 2), 3);
        assert_eq!(output_position(&c_sparse, &b, 3), 4);

        let c_hyper = SparsePattern::new_hyper(3, 10, vec![4, 8], vec![0, 2, 3], vec![1, 2, 0]);
        assert_eq!(output_position(&c_hyper, &b, 0), 0);
        assert_eq!(output_position(&c_hyper, &b, 1), 0);
        assert_eq!(output_position(&c_hyper, &b, 2), 2);
    }

    #[test]
    fn test_accumulate_columns_with_base_offset() {
        // A = I (2x2), B = [[1, 3], [2, 4]], C full pattern
        let a = SparsePattern::from_columns(2, &[vec![0], vec![1]]);
        let b = SparsePattern::from_columns(2, &[vec![0, 1], vec![0, 1]]);
        let c = SparsePattern::from_columns(2, &[vec![0, 1], vec![0, 1]]);
        let ax = [1.0, 1.0];
        let bx = [1.0, 2.0, 3.0, 4.0];

        let s = PlusTimes::<f64>::new();
        let ops = TypedOps(&s);
        let inputs = KernelInputs::<TypedOps<'_, PlusTimes<f64>>> {
            a: &a,
            ax: &ax[..],
            b: &b,
            bx: &bx[..],
            c: &c,
            mask: None,
            locator: LocatorMode::Trimmed,
        };
        let mut w = Workspace::for_semiring(&s, 2);

        // second column only, writing into a two-entry partition slice
        let mut cx = [0.0; 2];
        let stats = accumulate_columns(&ops, &inputs, 1..2, &mut cx[..], 2, &mut w);

        assert_eq!(cx, [3.0, 4.0]);
        assert_eq!(stats.columns_computed, 1);
        assert_eq!(stats.gathers, 2);
        assert_eq!(stats.locate_calls, 2);
    }
}
