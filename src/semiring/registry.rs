//! Registration surface for opaque semirings

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SpgemmError};
use crate::semiring::{LorLand, MaxMin, MaxPlus, MinPlus, OpaqueSemiring, PlusTimes, TypeCode};

/// Registry key: semiring name plus (output, left, right) element types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemiringKey {
    pub name: String,
    pub output: TypeCode,
    pub left: TypeCode,
    pub right: TypeCode,
}

impl SemiringKey {
    pub fn new(name: impl Into<String>, output: TypeCode, left: TypeCode, right: TypeCode) -> Self {
        Self {
            name: name.into(),
            output,
            left,
            right,
        }
    }

    fn of(semiring: &OpaqueSemiring) -> Self {
        Self::new(
            semiring.name(),
            semiring.output_type(),
            semiring.left_type(),
            semiring.right_type(),
        )
    }
}

impl fmt::Display for SemiringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{} = {} x {}>",
            self.name, self.output, self.left, self.right
        )
    }
}

/// Opaque semirings looked up by name and element types
#[derive(Debug, Default, Clone)]
pub struct SemiringRegistry {
    entries: HashMap<SemiringKey, Arc<OpaqueSemiring>>,
}

macro_rules! register_numeric {
    ($registry:expr, $($t:ty),*) => {
        $(
            $registry.insert(OpaqueSemiring::from_semiring(PlusTimes::<$t>::new()));
            $registry.insert(OpaqueSemiring::from_semiring(MinPlus::<$t>::new()));
            $registry.insert(OpaqueSemiring::from_semiring(MaxPlus::<$t>::new()));
            $registry.insert(OpaqueSemiring::from_semiring(MaxMin::<$t>::new()));
        )*
    };
}

impl SemiringRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in catalog for every numeric element type
    /// plus `lor_land` over `bool`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_numeric!(registry, i32, i64, u32, u64, f32, f64);
        registry.insert(lor_land_bytes());
        registry
    }

    fn insert(&mut self, semiring: OpaqueSemiring) {
        self.entries.insert(SemiringKey::of(&semiring), Arc::new(semiring));
    }

    /// Adds a semiring; fails if one with the same key exists
    pub fn register(&mut self, semiring: OpaqueSemiring) -> Result<Arc<OpaqueSemiring>> {
        let key = SemiringKey::of(&semiring);
        if self.entries.contains_key(&key) {
            return Err(SpgemmError::AlreadyRegistered(key.to_string()));
        }
        let semiring = Arc::new(semiring);
        self.entries.insert(key, Arc::clone(&semiring));
        Ok(semiring)
    }

    pub fn get(&self, key: &SemiringKey) -> Result<Arc<OpaqueSemiring>> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| SpgemmError::NotRegistered(key.to_string()))
    }

    /// Looks up a semiring whose three element types are all `ty`
    pub fn get_uniform(&self, name: &str, ty: TypeCode) -> Result<Arc<OpaqueSemiring>> {
        self.get(&SemiringKey::new(name, ty, ty, ty))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SemiringKey> {
        self.entries.keys()
    }
}

// bool is not Pod, so the boolean semiring is written directly over bytes
fn lor_land_bytes() -> OpaqueSemiring {
    let typed = LorLand;
    OpaqueSemiring::new(
        crate::semiring::Semiring::name(&typed),
        TypeCode::Bool,
        TypeCode::Bool,
        TypeCode::Bool,
        vec![0],
        Arc::new(|z: &mut [u8], x: &[u8], y: &[u8]| z[0] = u8::from(x[0] != 0 && y[0] != 0)),
        Arc::new(|z: &mut [u8], y: &[u8]| z[0] = u8::from(z[0] != 0 || y[0] != 0)),
    )
}
