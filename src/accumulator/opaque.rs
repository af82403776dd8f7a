//! Byte-oblivious dense accumulator

use crate::accumulator::NumericOps;
use crate::semiring::OpaqueSemiring;

/// Dense accumulation buffer of opaque output elements
#[derive(Debug, Clone)]
pub struct OpaqueWorkspace {
    slots: Vec<u8>,
    scratch: Vec<u8>,
    elem_size: usize,
    len: usize,
}

impl OpaqueWorkspace {
    /// Create a workspace of `len` slots of `semiring`'s output type
    pub fn new(semiring: &OpaqueSemiring, len: usize) -> Self {
        Self {
            slots: semiring.identity().repeat(len),
            scratch: vec![0; semiring.output_size()],
            elem_size: semiring.output_size(),
            len,
        }
    }

    /// Create a workspace with every slot set to `fill`
    pub fn filled(fill: &[u8], len: usize) -> Self {
        Self {
            slots: fill.repeat(len),
            scratch: vec![0; fill.len()],
            elem_size: fill.len(),
            len,
        }
    }

    /// Number of slots, zero-sized elements included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    /// Bytes of slot `row`
    pub fn slot(&self, row: usize) -> &[u8] {
        &self.slots[row * self.elem_size..(row + 1) * self.elem_size]
    }
}

impl NumericOps for OpaqueSemiring {
    type LeftValues = [u8];
    type RightValues = [u8];
    type OutputValues = [u8];
    type Work = OpaqueWorkspace;

    #[inline]
    fn work_len(&self, work: &OpaqueWorkspace) -> usize {
        work.len()
    }

    #[inline]
    fn clear(&self, work: &mut OpaqueWorkspace, row: usize) {
        let z = work.elem_size;
        work.slots[row * z..(row + 1) * z].copy_from_slice(self.identity());
    }

    #[inline]
    fn multiply_add(
        &self,
        work: &mut OpaqueWorkspace,
        row: usize,
        ax: &[u8],
        pa: usize,
        bx: &[u8],
        pb: usize,
    ) {
        let (z, x, y) = (work.elem_size, self.left_size(), self.right_size());
        self.multiply(
            &mut work.scratch,
            &ax[pa * x..(pa + 1) * x],
            &bx[pb * y..(pb + 1) * y],
        );
        self.accumulate(&mut work.slots[row * z..(row + 1) * z], &work.scratch);
    }

    #[inline]
    fn gather(&self, cx: &mut [u8], pc: usize, work: &OpaqueWorkspace, row: usize) {
        let z = work.elem_size;
        cx[pc * z..(pc + 1) * z].copy_from_slice(&work.slots[row * z..(row + 1) * z]);
    }

    #[inline]
    fn write_identity(&self, cx: &mut [u8], pc: usize) {
        let z = self.output_size();
        cx[pc * z..(pc + 1) * z].copy_from_slice(self.identity());
    }
}
