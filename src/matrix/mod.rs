// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod csc;
pub mod locator;
pub mod opaque;
pub mod pattern;
pub mod reference;

pub use config::{SpgemmConfig, SystemParameters};
pub use csc::SparseMatrixCSC;
pub use locator::{LocatorMode, VectorLocator};
pub use opaque::OpaqueMatrix;
pub use pattern::{SparsePattern, StorageMode};
pub use reference::{reference_spgemm, reference_values};
