//! Byte-oblivious semirings for element types unknown at build time

use std::fmt;
use std::sync::Arc;

use bytemuck::Pod;

use crate::semiring::{Element, Semiring, TypeCode};

/// `z = x ⊗ y` over raw element bytes
pub type MultiplyFn = Arc<dyn Fn(&mut [u8], &[u8], &[u8]) + Send + Sync>;

/// `z = z ⊕ y` over raw element bytes
pub type AccumulateFn = Arc<dyn Fn(&mut [u8], &[u8]) + Send + Sync>;

/// A semiring record over fixed-size opaque elements
///
/// The kernel only moves bytes around and calls `multiply`/`accumulate`;
/// what the bytes mean is up to those functions. They are total by
/// contract: a panic inside them propagates out of the multiply unchanged.
#[derive(Clone)]
pub struct OpaqueSemiring {
    name: String,
    output: TypeCode,
    left: TypeCode,
    right: TypeCode,
    identity: Vec<u8>,
    multiply: MultiplyFn,
    accumulate: AccumulateFn,
}

impl OpaqueSemiring {
    /// # Panics
    ///
    /// Panics if `identity.len()` differs from the output type's size.
    pub fn new(
        name: impl Into<String>,
        output: TypeCode,
        left: TypeCode,
        right: TypeCode,
        identity: Vec<u8>,
        multiply: MultiplyFn,
        accumulate: AccumulateFn,
    ) -> Self {
        assert_eq!(
            identity.len(),
            output.size(),
            "identity must be one output element"
        );
        Self {
            name: name.into(),
            output,
            left,
            right,
            identity,
            multiply,
            accumulate,
        }
    }

    /// Wraps a typed semiring so it runs on the byte-oblivious path
    ///
    /// Both paths compute the same operations in the same order, so their
    /// results agree bit for bit.
    pub fn from_semiring<S>(semiring: S) -> Self
    where
        S: Semiring + 'static,
        S::Left: Pod + Element,
        S::Right: Pod + Element,
        S::Output: Pod + Element,
    {
        let name = semiring.name().to_string();
        let identity = bytemuck::bytes_of(&semiring.identity()).to_vec();
        let semiring = Arc::new(semiring);

        let s = Arc::clone(&semiring);
        let multiply: MultiplyFn = Arc::new(move |z: &mut [u8], x: &[u8], y: &[u8]| {
            let a: S::Left = bytemuck::pod_read_unaligned(x);
            let b: S::Right = bytemuck::pod_read_unaligned(y);
            z.copy_from_slice(bytemuck::bytes_of(&s.multiply(a, b)));
        });

        let s = semiring;
        let accumulate: AccumulateFn = Arc::new(move |z: &mut [u8], y: &[u8]| {
            let existing: S::Output = bytemuck::pod_read_unaligned(z);
            let incoming: S::Output = bytemuck::pod_read_unaligned(y);
            z.copy_from_slice(bytemuck::bytes_of(&s.accumulate(existing, incoming)));
        });

        Self::new(
            name,
            S::Output::TYPE,
            S::Left::TYPE,
            S::Right::TYPE,
            identity,
            multiply,
            accumulate,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_type(&self) -> TypeCode {
        self.output
    }

    pub fn left_type(&self) -> TypeCode {
        self.left
    }

    pub fn right_type(&self) -> TypeCode {
        self.right
    }

    /// Byte size of one output element
    #[inline]
    pub fn output_size(&self) -> usize {
        self.output.size()
    }

    #[inline]
    pub fn left_size(&self) -> usize {
        self.left.size()
    }

    #[inline]
    pub fn right_size(&self) -> usize {
        self.right.size()
    }

    #[inline]
    pub fn identity(&self) -> &[u8] {
        &self.identity
    }

    #[inline]
    pub fn multiply(&self, z: &mut [u8], x: &[u8], y: &[u8]) {
        (self.multiply)(z, x, y)
    }

    #[inline]
    pub fn accumulate(&self, z: &mut [u8], y: &[u8]) {
        (self.accumulate)(z, y)
    }
}

impl fmt::Debug for OpaqueSemiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueSemiring")
            .field("name", &self.name)
            .field("output", &self.output)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
