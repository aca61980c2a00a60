//! The bin-content contract.
//!
//! A histogram never inspects its bins. It only needs to default-construct them
//! and hand fill arguments to them, so everything a bin type must provide is
//! captured by three small traits:
//!
//! - [`Accumulate<A>`]: absorb one fill with arguments `A`. `A = ()` is the
//!   plain "count one occurrence" fill used when no extra arguments are given.
//! - [`Materialize`]: read the bin out as a value, used for conversion between
//!   bin types.
//! - [`Merge`]: combine two bins filled independently (sharded filling).
//!
//! The impls for primitive numbers and `Vec<T>` live here; richer bin types are
//! in [`crate::bins`].

/// Absorb one fill into a bin.
///
/// A bin type may accept several argument types: a counter takes `()` or a
/// weight, a collection takes the value to record, a running statistic may take
/// `x` or `(x, weight)`.
///
/// Integer counters accept no weight they cannot represent exactly, so a
/// fractional or negative weight is a type error rather than a silent
/// truncation:
///
/// ```compile_fail
/// use hg_core::Accumulate;
///
/// let mut n = 0u64;
/// n.accumulate(0.5f64);
/// ```
///
/// ```compile_fail
/// use hg_core::Accumulate;
///
/// let mut n = 0u64;
/// n.accumulate(-1i32);
/// ```
pub trait Accumulate<A = ()> {
    /// Update the bin with one fill.
    fn accumulate(&mut self, args: A);
}

/// Read out the value a bin represents.
///
/// Converting a histogram to another bin type feeds this value to
/// `Accumulate` on a default-constructed target bin, so the conversion is only
/// as faithful as the materialized value.
pub trait Materialize {
    /// The materialized value.
    type Value;

    /// Current value of the bin.
    fn materialize(&self) -> Self::Value;
}

/// Combine bins that were filled independently.
///
/// `a.merge(&b)` must leave `a` equal (up to rounding) to a bin that received
/// the fills of both `a` and `b`.
pub trait Merge {
    /// Fold `other` into `self`.
    fn merge(&mut self, other: &Self);
}

// `$t += weight as $t` for each listed weight type. Integer counters only take
// integer weights of the same signedness that widen without loss; floats take
// anything.
macro_rules! impl_numeric_bin {
    ($t:ty; $($src:ty),*) => {
        impl Accumulate for $t {
            #[inline]
            fn accumulate(&mut self, _: ()) {
                *self += 1 as $t;
            }
        }

        $(
            impl Accumulate<$src> for $t {
                #[inline]
                fn accumulate(&mut self, weight: $src) {
                    *self += weight as $t;
                }
            }
        )*

        // A collection read out into a counter counts its entries.
        impl<T> Accumulate<Vec<T>> for $t {
            fn accumulate(&mut self, entries: Vec<T>) {
                *self += entries.len() as $t;
            }
        }

        impl Materialize for $t {
            type Value = $t;

            #[inline]
            fn materialize(&self) -> $t {
                *self
            }
        }

        impl Merge for $t {
            #[inline]
            fn merge(&mut self, other: &Self) {
                *self += *other;
            }
        }
    };
}

impl_numeric_bin!(u32; u32);
impl_numeric_bin!(u64; u32, u64, usize);
impl_numeric_bin!(usize; u32, usize);
impl_numeric_bin!(i32; i32);
impl_numeric_bin!(i64; i32, i64);
impl_numeric_bin!(f32; u32, u64, usize, i32, i64, f32, f64);
impl_numeric_bin!(f64; u32, u64, usize, i32, i64, f32, f64);

impl<T> Accumulate<T> for Vec<T> {
    #[inline]
    fn accumulate(&mut self, value: T) {
        self.push(value);
    }
}

impl<T: Clone> Materialize for Vec<T> {
    type Value = Vec<T>;

    fn materialize(&self) -> Vec<T> {
        self.clone()
    }
}

impl<T: Clone> Merge for Vec<T> {
    fn merge(&mut self, other: &Self) {
        self.extend_from_slice(other);
    }
}
