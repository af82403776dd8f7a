use thiserror::Error;

// Contract violations detected before the numeric kernel writes anything.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpgemmError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("output pattern is not finalized")]
    PatternNotFinalized,
    #[error("output stores {c_nvec} vectors but B stores only {b_nvec}")]
    TooManyVectors { c_nvec: usize, b_nvec: usize },
    #[error("invalid pattern for {matrix}: {reason}")]
    InvalidPattern { matrix: &'static str, reason: String },
    #[error("workspace holds {len} slots, output needs {required}")]
    WorkspaceTooSmall { len: usize, required: usize },
    #[error("{matrix} stores {len} values for {nnz} pattern entries")]
    ValueLength {
        matrix: &'static str,
        len: usize,
        nnz: usize,
    },
    #[error("{operand} elements are {actual} bytes, semiring expects {expected}")]
    ElementSize {
        operand: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("slot range {start}..{end} exceeds {nvec} stored vectors")]
    SlotRange { start: usize, end: usize, nvec: usize },
    #[error("no semiring registered as {0}")]
    NotRegistered(String),
    #[error("semiring already registered as {0}")]
    AlreadyRegistered(String),
}

pub type Result<T> = std::result::Result<T, SpgemmError>;
