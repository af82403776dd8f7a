//! Output masks for the masked variant of the numeric kernel
//!
//! A mask admits or rejects each output position `(i, j)`. Structural masks
//! admit every stored entry, valued masks only entries stored as `true`, and
//! a complemented mask flips the answer.

use crate::error::{Result, SpgemmError};
use crate::matrix::pattern::SparsePattern;

/// Membership test against a mask matrix
#[derive(Debug, Clone, Copy)]
pub struct Mask<'m> {
    pattern: &'m SparsePattern,
    values: Option<&'m [bool]>,
    complement: bool,
}

impl<'m> Mask<'m> {
    /// Admits positions stored in `pattern`, whatever their value
    pub fn structural(pattern: &'m SparsePattern) -> Self {
        Self {
            pattern,
            values: None,
            complement: false,
        }
    }

    /// Admits positions stored in `pattern` whose value is `true`
    pub fn valued(pattern: &'m SparsePattern, values: &'m [bool]) -> Self {
        Self {
            pattern,
            values: Some(values),
            complement: false,
        }
    }

    /// Flips which positions are admitted
    pub fn complemented(mut self) -> Self {
        self.complement = !self.complement;
        self
    }

    pub fn is_complemented(&self) -> bool {
        self.complement
    }

    pub fn is_structural(&self) -> bool {
        self.values.is_none()
    }

    pub fn pattern(&self) -> &'m SparsePattern {
        self.pattern
    }

    /// Predicate for column `j`
    #[inline]
    pub fn column(&self, j: usize) -> MaskColumn<'m> {
        let range = self.pattern.column_range(j);
        MaskColumn {
            rows: &self.pattern.row_idx[range.clone()],
            values: self.values.map(|v| &v[range]),
            complement: self.complement,
        }
    }

    /// Checks the mask's shape against output dimensions
    pub(crate) fn check(&self, n_rows: usize, n_cols: usize) -> Result<()> {
        if self.pattern.n_rows != n_rows || self.pattern.n_cols != n_cols {
            return Err(SpgemmError::DimensionMismatch(format!(
                "mask is {} × {}, output is {} × {}",
                self.pattern.n_rows, self.pattern.n_cols, n_rows, n_cols
            )));
        }
        if let Some(values) = self.values {
            if values.len() != self.pattern.nnz() {
                return Err(SpgemmError::ValueLength {
                    matrix: "M",
                    len: values.len(),
                    nnz: self.pattern.nnz(),
                });
            }
        }
        Ok(())
    }
}

/// One column of a [`Mask`]
#[derive(Debug, Clone, Copy)]
pub struct MaskColumn<'m> {
    rows: &'m [usize],
    values: Option<&'m [bool]>,
    complement: bool,
}

impl MaskColumn<'_> {
    /// Whether output row `row` of this column may be written
    #[inline]
    pub fn allows(&self, row: usize) -> bool {
        let hit = match self.rows.binary_search(&row) {
            Ok(p) => self.values.map_or(true, |v| v[p]),
            Err(_) => false,
        };
        hit != self.complement
    }
}
