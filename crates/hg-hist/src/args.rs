//! Per-axis argument lists.
//!
//! Coordinates and bin indices can be handed to a histogram as a scalar (for a
//! 1-D histogram), an array, a slice, a `Vec`, or a tuple. [`AxisArgs`] exposes
//! all of them as a slice without allocating; the histogram then checks the
//! length against its number of axes.

/// One value per axis.
pub trait AxisArgs<T> {
    /// Call `f` with the values as a slice.
    fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R;
}

macro_rules! impl_scalar_args {
    ($($t:ty),*) => {
        $(
            impl AxisArgs<$t> for $t {
                #[inline]
                fn with_slice<R>(&self, f: impl FnOnce(&[$t]) -> R) -> R {
                    f(std::slice::from_ref(self))
                }
            }
        )*
    };
}

impl_scalar_args!(f64, usize);

impl<T, const N: usize> AxisArgs<T> for [T; N] {
    #[inline]
    fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self)
    }
}

impl<T, const N: usize> AxisArgs<T> for &[T; N] {
    #[inline]
    fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(*self)
    }
}

impl<T> AxisArgs<T> for &[T] {
    #[inline]
    fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self)
    }
}

impl<T> AxisArgs<T> for Vec<T> {
    #[inline]
    fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self)
    }
}

impl<T> AxisArgs<T> for &Vec<T> {
    #[inline]
    fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self)
    }
}

macro_rules! impl_tuple_args {
    ($($idx:tt : $t:ident),+) => {
        impl<T: Copy> AxisArgs<T> for ($($t,)+) {
            #[inline]
            fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
                f(&[$(self.$idx),+])
            }
        }
    };
}

impl_tuple_args!(0: T);
impl_tuple_args!(0: T, 1: T);
impl_tuple_args!(0: T, 1: T, 2: T);
impl_tuple_args!(0: T, 1: T, 2: T, 3: T);
impl_tuple_args!(0: T, 1: T, 2: T, 3: T, 4: T);
impl_tuple_args!(0: T, 1: T, 2: T, 3: T, 4: T, 5: T);

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Copy, A: AxisArgs<T>>(args: A) -> Vec<T> {
        args.with_slice(|s| s.to_vec())
    }

    #[test]
    fn all_forms_expose_the_same_values() {
        let v = vec![1.5, 2.5];
        assert_eq!(collect([1.5, 2.5]), v);
        assert_eq!(collect(&[1.5, 2.5]), v);
        assert_eq!(collect(v.as_slice()), v);
        assert_eq!(collect(&v), v);
        assert_eq!(collect(v.clone()), v);
        assert_eq!(collect((1.5, 2.5)), v);
        assert_eq!(collect(0.5), vec![0.5]);
        assert_eq!(collect(3usize), vec![3]);
        assert_eq!(collect((1usize, 2, 3, 4, 5, 6)), vec![1, 2, 3, 4, 5, 6]);
    }
}
