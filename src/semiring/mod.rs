//! Semirings: the algebra a sparse product is computed in
//!
//! A semiring supplies an identity for the output type, a multiply from
//! left × right to output, and an accumulate folding two outputs together.
//! `C(i,j) = accumulate over k of multiply(A(i,k), B(k,j))`, starting from
//! the identity and visiting `k` in ascending order.
//!
//! Two families are provided:
//!
//! - [`Semiring`] implementors are ordinary Rust types. The kernel is
//!   monomorphised for each one, which is how the built-in catalog in
//!   [`builtin`] gets specialised code.
//! - [`OpaqueSemiring`] treats every element as a fixed-size block of bytes
//!   and calls caller-supplied functions. It serves types and operators not
//!   known when the crate is built, and is looked up through a
//!   [`SemiringRegistry`].

pub mod builtin;
pub mod opaque;
pub mod registry;

use std::fmt;

pub use builtin::{FnSemiring, LorLand, MaxMin, MaxPlus, MinPlus, PlusTimes};
pub use opaque::OpaqueSemiring;
pub use registry::{SemiringKey, SemiringRegistry};

/// Multiply/accumulate pair with an identity, over typed elements
pub trait Semiring: Send + Sync {
    type Left: Copy + Send + Sync;
    type Right: Copy + Send + Sync;
    type Output: Copy + Send + Sync;

    /// Identity of `accumulate`
    fn identity(&self) -> Self::Output;

    fn multiply(&self, a: Self::Left, b: Self::Right) -> Self::Output;

    /// Folds `incoming` into `existing`
    fn accumulate(&self, existing: Self::Output, incoming: Self::Output) -> Self::Output;

    /// Short name used for logging and registry keys
    fn name(&self) -> &str;
}

/// Element type tag used to key opaque semirings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Bool,
    U8,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    /// Caller-defined type of the given byte size
    User { id: u32, size: usize },
}

impl TypeCode {
    /// Size of one element in bytes
    pub fn size(self) -> usize {
        match self {
            TypeCode::Bool | TypeCode::U8 => 1,
            TypeCode::I32 | TypeCode::U32 | TypeCode::F32 => 4,
            TypeCode::I64 | TypeCode::U64 | TypeCode::F64 => 8,
            TypeCode::User { size, .. } => size,
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCode::Bool => write!(f, "bool"),
            TypeCode::U8 => write!(f, "u8"),
            TypeCode::I32 => write!(f, "i32"),
            TypeCode::I64 => write!(f, "i64"),
            TypeCode::U32 => write!(f, "u32"),
            TypeCode::U64 => write!(f, "u64"),
            TypeCode::F32 => write!(f, "f32"),
            TypeCode::F64 => write!(f, "f64"),
            TypeCode::User { id, size } => write!(f, "user{}[{}]", id, size),
        }
    }
}

/// Built-in element types with a known [`TypeCode`]
pub trait Element: Copy + Send + Sync + 'static {
    const TYPE: TypeCode;
}

macro_rules! impl_element {
    ($($t:ty => $code:ident),* $(,)?) => {
        $(impl Element for $t {
            const TYPE: TypeCode = TypeCode::$code;
        })*
    };
}

impl_element!(
    bool => Bool,
    u8 => U8,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
);
