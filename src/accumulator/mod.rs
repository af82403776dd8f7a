//! Dense accumulators for the numeric phase of Gustavson's method
//!
//! Each worker owns one workspace of `n_rows(C)` slots for the whole
//! multiply. A column only ever touches the slots its output pattern names:
//! they are set to the identity, accumulated into, then gathered into C.
//! Every other slot holds whatever an earlier column left there and is
//! never read. No method resets the whole buffer.
//!
//! [`NumericOps`] is the seam between the kernel, which walks patterns, and
//! the element representation. Typed semirings plug in through
//! [`TypedOps`]; opaque ones implement it directly over byte blocks.

pub mod dense;
pub mod opaque;

pub use dense::{TypedOps, Workspace};
pub use opaque::OpaqueWorkspace;

/// Element-level operations the numeric kernel is generic over
///
/// Positions are entry indices into the respective value arrays; rows are
/// workspace slots.
pub trait NumericOps {
    /// Value storage of A
    type LeftValues: ?Sized;
    /// Value storage of B
    type RightValues: ?Sized;
    /// Value storage of C (possibly one partition of it)
    type OutputValues: ?Sized;
    /// Per-worker dense accumulator
    type Work;

    /// Number of slots available in `work`
    fn work_len(&self, work: &Self::Work) -> usize;

    /// `w[row] = identity`
    fn clear(&self, work: &mut Self::Work, row: usize);

    /// `w[row] = accumulate(w[row], multiply(ax[pa], bx[pb]))`
    fn multiply_add(
        &self,
        work: &mut Self::Work,
        row: usize,
        ax: &Self::LeftValues,
        pa: usize,
        bx: &Self::RightValues,
        pb: usize,
    );

    /// `cx[pc] = w[row]`
    fn gather(&self, cx: &mut Self::OutputValues, pc: usize, work: &Self::Work, row: usize);

    /// `cx[pc] = identity`, for output positions a mask excludes
    fn write_identity(&self, cx: &mut Self::OutputValues, pc: usize);
}
