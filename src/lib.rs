//! # Gustavson: semiring-generic numeric SpGEMM
//!
//! Computes the values of `C = A·B` over an arbitrary semiring, given C's
//! nonzero pattern from a prior symbolic phase.
//!
//! ## Overview
//!
//! Matrices are stored by column, either sparse (one vector slot per column)
//! or hypersparse (only nonempty columns are stored, listed in a sorted
//! column-id array). The numeric phase follows Gustavson's method:
//!
//! - A dense [`Workspace`] of `n_rows(C)` slots, owned by one worker
//! - Only the rows of C's pattern are ever reset, so work stays
//!   proportional to flops plus `nnz(C)`
//! - A [`VectorLocator`] finds columns of a hypersparse A inside a window
//!   that only shrinks while a column of C is computed
//!
//! ## Semirings
//!
//! Built-in semirings ([`PlusTimes`], [`MinPlus`], [`MaxPlus`], [`MaxMin`],
//! [`LorLand`]) and closures ([`FnSemiring`]) implement [`Semiring`] and get
//! monomorphised kernels. [`OpaqueSemiring`] works on fixed-size byte
//! blocks for element types only known at run time.
//!
//! ## Usage
//!
//! ```
//! use gustavson::{
//!     spgemm_numeric, PlusTimes, SparseMatrixCSC, SparsePattern, SpgemmConfig, Workspace,
//! };
//!
//! let a = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1.0)], vec![(1, 2.0)]]);
//! let b = SparseMatrixCSC::from_columns(2, vec![vec![(0, 1.0)], vec![(0, 1.0), (1, 1.0)]]);
//! let pattern = SparsePattern::from_columns(2, &[vec![0], vec![0, 1]]);
//! let mut c = SparseMatrixCSC::with_pattern(pattern, 0.0);
//!
//! let semiring = PlusTimes::<f64>::new();
//! let mut w = Workspace::for_semiring(&semiring, c.n_rows());
//! spgemm_numeric(&mut c, &a, &b, &semiring, &mut w, &SpgemmConfig::default()).unwrap();
//! assert_eq!(c.values, vec![1.0, 1.0, 2.0]);
//! ```
//!
//! A slow reference implementation is available for validation:
//!
//! ```
//! use gustavson::{reference_spgemm, MinPlus, SparseMatrixCSC};
//!
//! let a = SparseMatrixCSC::from_columns(2, vec![vec![(1, 4.0)], vec![(0, 1.0)]]);
//! let c = reference_spgemm(&a, &a, &MinPlus::<f64>::new());
//! assert_eq!(c.values, vec![5.0, 5.0]);
//! ```

pub mod accumulator;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod parallel;
pub mod semiring;
pub mod utils;

// Re-export primary components
pub use matrix::{
    reference_spgemm, reference_values, LocatorMode, OpaqueMatrix, SparseMatrixCSC,
    SparsePattern, SpgemmConfig, StorageMode, SystemParameters, VectorLocator,
};
pub use semiring::{
    Element, FnSemiring, LorLand, MaxMin, MaxPlus, MinPlus, OpaqueSemiring, PlusTimes, Semiring,
    SemiringKey, SemiringRegistry, TypeCode,
};
pub use accumulator::{NumericOps, OpaqueWorkspace, TypedOps, Workspace};
pub use kernel::{
    spgemm_numeric, spgemm_numeric_masked, spgemm_numeric_opaque, spgemm_numeric_opaque_masked,
    spgemm_numeric_range, KernelStats, Mask, MaskColumn,
};
pub use parallel::{spgemm_numeric_parallel, spgemm_numeric_parallel_masked};
pub use error::{Result, SpgemmError};
pub use utils::formats::{from_sprs_csc, to_sprs_csc};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
