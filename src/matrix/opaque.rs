//! Compressed-column matrix whose values are fixed-size opaque byte blocks

use bytemuck::Pod;

use crate::matrix::csc::SparseMatrixCSC;
use crate::matrix::pattern::SparsePattern;

/// A CSC matrix storing each value as `elem_size` raw bytes
///
/// Entry `p` occupies `values[p * elem_size..(p + 1) * elem_size]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueMatrix {
    pub pattern: SparsePattern,
    pub values: Vec<u8>,
    pub elem_size: usize,
}

impl OpaqueMatrix {
    /// # Panics
    ///
    /// Panics if `values.len() != pattern.nnz() * elem_size`.
    pub fn new(pattern: SparsePattern, values: Vec<u8>, elem_size: usize) -> Self {
        assert_eq!(
            values.len(),
            pattern.nnz() * elem_size,
            "values.len() must equal nnz * elem_size"
        );
        Self {
            pattern,
            values,
            elem_size,
        }
    }

    /// Allocates values for an existing pattern, every entry set to `fill`
    pub fn with_pattern(pattern: SparsePattern, fill: &[u8]) -> Self {
        let values = fill.repeat(pattern.nnz());
        Self {
            pattern,
            values,
            elem_size: fill.len(),
        }
    }

    /// Reinterprets a typed matrix's values as bytes
    pub fn from_typed<T: Pod>(matrix: &SparseMatrixCSC<T>) -> Self {
        Self {
            pattern: matrix.pattern.clone(),
            values: bytemuck::cast_slice(&matrix.values).to_vec(),
            elem_size: std::mem::size_of::<T>(),
        }
    }

    /// Reads the values back as `T`
    ///
    /// # Panics
    ///
    /// Panics if `elem_size` is not the size of `T`.
    pub fn to_typed<T: Pod>(&self) -> SparseMatrixCSC<T> {
        assert_eq!(self.elem_size, std::mem::size_of::<T>(), "element size mismatch");
        let values = self
            .values
            .chunks_exact(self.elem_size)
            .map(bytemuck::pod_read_unaligned)
            .collect();
        SparseMatrixCSC {
            pattern: self.pattern.clone(),
            values,
        }
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.pattern.nnz()
    }

    /// Bytes of the value at entry position `p`
    #[inline]
    pub fn value_bytes(&self, p: usize) -> &[u8] {
        &self.values[p * self.elem_size..(p + 1) * self.elem_size]
    }
}
