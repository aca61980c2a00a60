//! Standard bin-content types beyond plain numbers and collections.

use crate::traits::{Accumulate, Materialize, Merge};

/// Sum of weights and sum of squared weights.
///
/// `sqrt(w2)` is the usual statistical uncertainty of a weighted bin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightBin {
    /// Sum of weights.
    pub w: f64,
    /// Sum of squared weights.
    pub w2: f64,
}

impl WeightBin {
    /// Statistical uncertainty, `sqrt(w2)`.
    pub fn error(&self) -> f64 {
        self.w2.sqrt()
    }
}

impl Accumulate for WeightBin {
    #[inline]
    fn accumulate(&mut self, _: ()) {
        self.w += 1.0;
        self.w2 += 1.0;
    }
}

impl Materialize for WeightBin {
    type Value = f64;

    fn materialize(&self) -> f64 {
        self.w
    }
}

impl Merge for WeightBin {
    fn merge(&mut self, other: &Self) {
        self.w += other.w;
        self.w2 += other.w2;
    }
}

/// [`WeightBin`] plus the raw number of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct McBin {
    /// Sum of weights.
    pub w: f64,
    /// Sum of squared weights.
    pub w2: f64,
    /// Number of fills.
    pub n: u64,
}

impl McBin {
    /// Statistical uncertainty, `sqrt(w2)`.
    pub fn error(&self) -> f64 {
        self.w2.sqrt()
    }
}

impl Accumulate for McBin {
    #[inline]
    fn accumulate(&mut self, _: ()) {
        self.w += 1.0;
        self.w2 += 1.0;
        self.n += 1;
    }
}

impl Materialize for McBin {
    type Value = f64;

    fn materialize(&self) -> f64 {
        self.w
    }
}

impl Merge for McBin {
    fn merge(&mut self, other: &Self) {
        self.w += other.w;
        self.w2 += other.w2;
        self.n += other.n;
    }
}

/// Running weighted mean and variance of the values filled into a bin.
///
/// Updated incrementally (West's weighted variant of Welford's algorithm), so
/// the values themselves are never stored. Fill with `x` for unit weight or with
/// `(x, weight)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatBin {
    n: u64,
    total: f64,
    mean: f64,
    m2: f64,
}

impl StatBin {
    /// Record `x` with the given weight.
    pub fn push(&mut self, x: f64, weight: f64) {
        self.total += weight;
        if self.n == 0 {
            self.mean = x;
        } else {
            let wd = weight * (x - self.mean);
            self.mean += wd / self.total;
            self.m2 += wd * (x - self.mean);
        }
        self.n += 1;
    }

    /// Number of fills.
    pub fn count(&self) -> u64 {
        self.n
    }

    /// Sum of weights.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Weighted mean of the filled values (0 for an empty bin).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased weighted variance, `n·m2 / ((n-1)·total)`; 0 with fewer than two fills.
    pub fn variance(&self) -> f64 {
        if self.n > 1 {
            let n = self.n as f64;
            n * self.m2 / ((n - 1.0) * self.total)
        } else {
            0.0
        }
    }

    /// Square root of [`StatBin::variance`].
    pub fn stdev(&self) -> f64 {
        self.variance().sqrt()
    }
}

macro_rules! impl_stat_value {
    ($($t:ty),*) => {
        $(
            impl Accumulate<$t> for StatBin {
                #[inline]
                fn accumulate(&mut self, x: $t) {
                    self.push(x as f64, 1.0);
                }
            }
        )*
    };
}

impl_stat_value!(u32, u64, usize, i32, i64, f32, f64);

impl Accumulate<(f64, f64)> for StatBin {
    #[inline]
    fn accumulate(&mut self, (x, weight): (f64, f64)) {
        self.push(x, weight);
    }
}

impl Materialize for StatBin {
    type Value = f64;

    fn materialize(&self) -> f64 {
        self.total
    }
}

impl Merge for StatBin {
    fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }
        let total = self.total + other.total;
        let delta = other.mean - self.mean;
        if total != 0.0 {
            self.mean += delta * other.total / total;
            self.m2 += other.m2 + delta * delta * self.total * other.total / total;
        } else {
            self.m2 += other.m2;
        }
        self.total = total;
        self.n += other.n;
    }
}

macro_rules! impl_weighted_numeric {
    ($($t:ty),*) => {
        $(
            impl Accumulate<$t> for WeightBin {
                #[inline]
                fn accumulate(&mut self, weight: $t) {
                    let w = weight as f64;
                    self.w += w;
                    self.w2 += w * w;
                }
            }
        )*
    };
}

impl_weighted_numeric!(u32, u64, usize, i32, i64, f32, f64);

macro_rules! impl_mc_numeric {
    ($($t:ty),*) => {
        $(
            impl Accumulate<$t> for McBin {
                #[inline]
                fn accumulate(&mut self, weight: $t) {
                    let w = weight as f64;
                    self.w += w;
                    self.w2 += w * w;
                    self.n += 1;
                }
            }
        )*
    };
}

impl_mc_numeric!(u32, u64, usize, i32, i64, f32, f64);
