//! Built-in semiring catalog
//!
//! | Semiring | accumulate | multiply | identity |
//! |----------|------------|----------|----------|
//! | `PlusTimes` | + | × | 0 |
//! | `MinPlus` | min | + | +∞ (or `MAX`) |
//! | `MaxPlus` | max | + | -∞ (or `MIN`) |
//! | `MaxMin` | max | min | -∞ (or `MIN`) |
//! | `LorLand` | OR | AND | false |

use std::marker::PhantomData;
use std::ops::Add;

use num_traits::Num;

use crate::semiring::Semiring;

/// Extreme values used as min/max identities
pub trait Extremum: Copy + PartialOrd {
    /// Largest value, identity of `min`
    fn top() -> Self;
    /// Smallest value, identity of `max`
    fn bottom() -> Self;
}

macro_rules! impl_extremum_int {
    ($($t:ty),*) => {
        $(impl Extremum for $t {
            fn top() -> Self { <$t>::MAX }
            fn bottom() -> Self { <$t>::MIN }
        })*
    };
}

macro_rules! impl_extremum_float {
    ($($t:ty),*) => {
        $(impl Extremum for $t {
            fn top() -> Self { <$t>::INFINITY }
            fn bottom() -> Self { <$t>::NEG_INFINITY }
        })*
    };
}

impl_extremum_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
impl_extremum_float!(f32, f64);

#[inline]
fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

#[inline]
fn max_of<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

macro_rules! marker_semiring {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<T>(PhantomData<fn() -> T>);

        impl<T> $name<T> {
            pub fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

marker_semiring!(
    /// Conventional arithmetic: (+, ×)
    PlusTimes
);
marker_semiring!(
    /// Tropical (min, +): shortest paths
    MinPlus
);
marker_semiring!(
    /// Tropical (max, +): longest paths
    MaxPlus
);
marker_semiring!(
    /// (max, min): bottleneck capacity
    MaxMin
);

impl<T> Semiring for PlusTimes<T>
where
    T: Num + Copy + Send + Sync,
{
    type Left = T;
    type Right = T;
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        a * b
    }

    #[inline]
    fn accumulate(&self, existing: T, incoming: T) -> T {
        existing + incoming
    }

    fn name(&self) -> &str {
        "plus_times"
    }
}

impl<T> Semiring for MinPlus<T>
where
    T: Extremum + Add<Output = T> + Send + Sync,
{
    type Left = T;
    type Right = T;
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::top()
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        a + b
    }

    #[inline]
    fn accumulate(&self, existing: T, incoming: T) -> T {
        min_of(existing, incoming)
    }

    fn name(&self) -> &str {
        "min_plus"
    }
}

impl<T> Semiring for MaxPlus<T>
where
    T: Extremum + Add<Output = T> + Send + Sync,
{
    type Left = T;
    type Right = T;
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::bottom()
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        a + b
    }

    #[inline]
    fn accumulate(&self, existing: T, incoming: T) -> T {
        max_of(existing, incoming)
    }

    fn name(&self) -> &str {
        "max_plus"
    }
}

impl<T> Semiring for MaxMin<T>
where
    T: Extremum + Send + Sync,
{
    type Left = T;
    type Right = T;
    type Output = T;

    #[inline]
    fn identity(&self) -> T {
        T::bottom()
    }

    #[inline]
    fn multiply(&self, a: T, b: T) -> T {
        min_of(a, b)
    }

    #[inline]
    fn accumulate(&self, existing: T, incoming: T) -> T {
        max_of(existing, incoming)
    }

    fn name(&self) -> &str {
        "max_min"
    }
}

/// Boolean (OR, AND): reachability
#[derive(Debug, Clone, Copy, Default)]
pub struct LorLand;

impl Semiring for LorLand {
    type Left = bool;
    type Right = bool;
    type Output = bool;

    #[inline]
    fn identity(&self) -> bool {
        false
    }

    #[inline]
    fn multiply(&self, a: bool, b: bool) -> bool {
        a && b
    }

    #[inline]
    fn accumulate(&self, existing: bool, incoming: bool) -> bool {
        existing || incoming
    }

    fn name(&self) -> &str {
        "lor_land"
    }
}

/// Typed semiring assembled from closures
///
/// Useful for operators outside the catalog whose element types are still
/// ordinary Rust types.
#[derive(Clone)]
pub struct FnSemiring<L, R, O, M, A> {
    name: String,
    identity: O,
    multiply: M,
    accumulate: A,
    _types: PhantomData<fn(L, R) -> O>,
}

impl<L, R, O, M, A> FnSemiring<L, R, O, M, A>
where
    M: Fn(L, R) -> O,
    A: Fn(O, O) -> O,
{
    pub fn new(name: impl Into<String>, identity: O, multiply: M, accumulate: A) -> Self {
        Self {
            name: name.into(),
            identity,
            multiply,
            accumulate,
            _types: PhantomData,
        }
    }
}

impl<L, R, O, M, A> Semiring for FnSemiring<L, R, O, M, A>
where
    L: Copy + Send + Sync,
    R: Copy + Send + Sync,
    O: Copy + Send + Sync,
    M: Fn(L, R) -> O + Send + Sync,
    A: Fn(O, O) -> O + Send + Sync,
{
    type Left = L;
    type Right = R;
    type Output = O;

    #[inline]
    fn identity(&self) -> O {
        self.identity
    }

    #[inline]
    fn multiply(&self, a: L, b: R) -> O {
        (self.multiply)(a, b)
    }

    #[inline]
    fn accumulate(&self, existing: O, incoming: O) -> O {
        (self.accumulate)(existing, incoming)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
