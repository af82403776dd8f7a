//! Typed dense accumulator

use crate::accumulator::NumericOps;
use crate::semiring::Semiring;

/// Dense accumulation buffer for one worker
///
/// Holds one output-typed slot per row of C. Only the slots named by the
/// current output column's pattern are meaningful at any time.
#[derive(Debug, Clone)]
pub struct Workspace<T> {
    slots: Vec<T>,
}

impl<T: Copy> Workspace<T> {
    /// Create a workspace of `len` slots, all holding `fill`
    ///
    /// # Arguments
    ///
    /// * `len` - The number of rows of the output matrix (C)
    /// * `fill` - Initial contents; never read by the kernel
    pub fn new(len: usize, fill: T) -> Self {
        Self {
            slots: vec![fill; len],
        }
    }

    /// Create a workspace for products under `semiring` with `len` rows
    pub fn for_semiring<S>(semiring: &S, len: usize) -> Self
    where
        S: Semiring<Output = T>,
    {
        Self::new(len, semiring.identity())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw view of every slot, stale ones included
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }
}

/// Adapter running a typed [`Semiring`] through the numeric kernel
#[derive(Debug, Clone, Copy)]
pub struct TypedOps<'s, S>(pub &'s S);

impl<S: Semiring> NumericOps for TypedOps<'_, S> {
    type LeftValues = [S::Left];
    type RightValues = [S::Right];
    type OutputValues = [S::Output];
    type Work = Workspace<S::Output>;

    #[inline]
    fn work_len(&self, work: &Self::Work) -> usize {
        work.len()
    }

    #[inline]
    fn clear(&self, work: &mut Self::Work, row: usize) {
        work.slots[row] = self.0.identity();
    }

    #[inline]
    fn multiply_add(
        &self,
        work: &mut Self::Work,
        row: usize,
        ax: &[S::Left],
        pa: usize,
        bx: &[S::Right],
        pb: usize,
    ) {
        let t = self.0.multiply(ax[pa], bx[pb]);
        work.slots[row] = self.0.accumulate(work.slots[row], t);
    }

    #[inline]
    fn gather(&self, cx: &mut [S::Output], pc: usize, work: &Self::Work, row: usize) {
        cx[pc] = work.slots[row];
    }

    #[inline]
    fn write_identity(&self, cx: &mut [S::Output], pc: usize) {
        cx[pc] = self.0.identity();
    }
}
