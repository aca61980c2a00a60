//! Binning along one dimension.
//!
//! An [`Axis`] is nothing more than a validated, strictly increasing list of
//! bin edges. Every accepted way of describing an axis (uniform range,
//! segments, shorthand strings) is normalized into that list by
//! [`crate::spec`] before an `Axis` exists, so lookup only ever deals with
//! plain edges.
//!
//! Bin indices include two pseudo-bins:
//!
//! | index | covers |
//! |---|---|
//! | `0` | `x < edges[0]` (underflow) |
//! | `i` in `1..=nbins` | `edges[i-1] <= x < edges[i]`; the last real bin also contains `edges[nbins]` |
//! | `nbins + 1` | `x > edges[nbins]` and NaN (overflow) |

use std::ops::Index;
use std::str::FromStr;

use hg_core::{Error, Result};

use crate::spec::{self, AxisSpec, Segment};

/// A binning axis defined by its edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    edges: Vec<f64>,
}

impl Axis {
    /// `nbins` equal-width bins spanning `[low, high]`.
    ///
    /// A reversed range is swapped rather than rejected.
    pub fn uniform(nbins: usize, low: f64, high: f64) -> Result<Self> {
        Self::from_segments(&[Segment::Uniform { nbins, low, high }])
    }

    /// Axis with explicit edges. The edges must be finite and strictly increasing.
    pub fn from_edges(edges: impl Into<Vec<f64>>) -> Result<Self> {
        let edges = edges.into();
        spec::validate_edges(&edges)?;
        Ok(Self { edges })
    }

    /// Axis made of consecutive segments; see [`Segment`].
    pub fn from_segments(segments: &[Segment]) -> Result<Self> {
        let edges = spec::expand_segments(segments)?;
        log::debug!(
            "axis built from {} segment(s): {} bins over [{}, {}]",
            segments.len(),
            edges.len() - 1,
            edges[0],
            edges[edges.len() - 1]
        );
        Ok(Self { edges })
    }

    /// Number of real bins (excludes underflow and overflow).
    pub fn nbins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Number of edges, `nbins() + 1`.
    pub fn nedges(&self) -> usize {
        self.edges.len()
    }

    /// All edges in increasing order.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Edge `i`, if it exists.
    pub fn edge(&self, i: usize) -> Option<f64> {
        self.edges.get(i).copied()
    }

    /// First edge.
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Last edge.
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Lower bound of bin `bin` (`-inf` for the underflow bin).
    pub fn lower(&self, bin: usize) -> Result<f64> {
        match bin {
            0 => Ok(f64::NEG_INFINITY),
            b if b <= self.nbins() + 1 => Ok(self.edges[b - 1]),
            b => Err(Error::out_of_range("bin", b, self.nbins() + 2)),
        }
    }

    /// Upper bound of bin `bin` (`+inf` for the overflow bin).
    pub fn upper(&self, bin: usize) -> Result<f64> {
        let n = self.nbins();
        match bin {
            b if b <= n => Ok(self.edges[b]),
            b if b == n + 1 => Ok(f64::INFINITY),
            b => Err(Error::out_of_range("bin", b, n + 2)),
        }
    }

    /// Width of real bin `bin` (`1..=nbins`).
    pub fn width(&self, bin: usize) -> Result<f64> {
        if bin == 0 || bin > self.nbins() {
            return Err(Error::out_of_range("real bin", bin, self.nbins() + 1));
        }
        Ok(self.edges[bin] - self.edges[bin - 1])
    }

    /// Index of the bin containing `x`, including the underflow (`0`) and
    /// overflow (`nbins() + 1`) pseudo-bins.
    ///
    /// Binary search over the edges. The last edge belongs to the last real
    /// bin; NaN goes to overflow.
    #[inline]
    pub fn find_bin_index(&self, x: f64) -> usize {
        let n = self.nbins();
        if x.is_nan() {
            return n + 1;
        }
        let last = self.edges[n];
        if x > last {
            return n + 1;
        }
        if x == last {
            return n;
        }
        // Number of edges <= x; 0 when x is below the first edge.
        self.edges.partition_point(|&e| e <= x)
    }

    /// Iterate over the edges.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, f64>> {
        self.edges.iter().copied()
    }
}

impl Index<usize> for Axis {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.edges[i]
    }
}

impl<'a> IntoIterator for &'a Axis {
    type Item = f64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<f64>> for Axis {
    type Error = Error;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        Self::from_edges(edges)
    }
}

impl TryFrom<&AxisSpec> for Axis {
    type Error = Error;

    fn try_from(spec: &AxisSpec) -> Result<Self> {
        spec.build()
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<AxisSpec>()?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_axis_scenario() {
        let a = Axis::uniform(5, 0.0, 5.0).unwrap();
        assert_eq!(a.nbins(), 5);
        assert_eq!(a.nedges(), 6);
        assert_eq!(a.edges(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(a.find_bin_index(2.5), 3);
    }

    #[test]
    fn lookup_boundaries() {
        let a = Axis::from_edges(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(a.find_bin_index(-0.5), 0);
        assert_eq!(a.find_bin_index(f64::NEG_INFINITY), 0);
        assert_eq!(a.find_bin_index(0.0), 1);
        assert_eq!(a.find_bin_index(0.999), 1);
        assert_eq!(a.find_bin_index(1.0), 2);
        assert_eq!(a.find_bin_index(2.99), 3);
        // closed top bin
        assert_eq!(a.find_bin_index(3.0), 3);
        assert_eq!(a.find_bin_index(3.0001), 4);
        assert_eq!(a.find_bin_index(f64::INFINITY), 4);
        assert_eq!(a.find_bin_index(f64::NAN), 4);
    }

    #[test]
    fn uniform_matches_explicit_decimal_edges() {
        let uniform = Axis::uniform(10, 0.0, 1.0).unwrap();
        let explicit =
            Axis::from_edges([0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]).unwrap();
        assert_eq!(uniform, explicit);
        assert_eq!(uniform.find_bin_index(0.3), 4);
        assert_eq!(uniform.find_bin_index(0.7), 8);
        assert_eq!(explicit.find_bin_index(0.3), 4);
    }

    #[test]
    fn huge_bin_count_is_an_error() {
        assert!(matches!(Axis::uniform(usize::MAX, 0.0, 1.0), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn reversed_uniform_range_is_swapped() {
        let a = Axis::uniform(4, 2.0, -2.0).unwrap();
        assert_eq!(a.edges(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn invalid_axes_rejected() {
        assert!(matches!(Axis::uniform(0, 0.0, 1.0), Err(Error::InvalidSpec(_))));
        assert!(matches!(Axis::uniform(3, 1.0, 1.0), Err(Error::InvalidSpec(_))));
        assert!(matches!(Axis::uniform(3, 0.0, f64::INFINITY), Err(Error::InvalidSpec(_))));
        assert!(matches!(Axis::from_edges(vec![1.0]), Err(Error::InvalidSpec(_))));
        assert!(matches!(Axis::from_edges(vec![0.0, 2.0, 1.0]), Err(Error::InvalidSpec(_))));
        assert!(matches!(Axis::from_edges(vec![0.0, 1.0, 1.0]), Err(Error::InvalidSpec(_))));
        assert!(matches!(Axis::from_edges(vec![0.0, f64::NAN]), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn pseudo_bin_bounds() {
        let a = Axis::from_edges(vec![1.0, 2.0, 4.0]).unwrap();
        assert_eq!(a.lower(0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(a.upper(0).unwrap(), 1.0);
        assert_eq!(a.lower(2).unwrap(), 2.0);
        assert_eq!(a.upper(2).unwrap(), 4.0);
        assert_eq!(a.lower(3).unwrap(), 4.0);
        assert_eq!(a.upper(3).unwrap(), f64::INFINITY);
        assert!(a.lower(4).is_err());
        assert!(a.upper(4).is_err());
        assert_eq!(a.width(2).unwrap(), 2.0);
        assert!(a.width(0).is_err());
        assert!(matches!(
            a.width(3),
            Err(Error::IndexOutOfRange { what: "real bin", index: 3, len: 3 })
        ));
    }

    #[test]
    fn edge_access_and_iteration() {
        let a = Axis::uniform(2, 0.0, 1.0).unwrap();
        assert_eq!(a[1], 0.5);
        assert_eq!(a.edge(2), Some(1.0));
        assert_eq!(a.edge(3), None);
        assert_eq!((a.min(), a.max()), (0.0, 1.0));
        let first: Vec<f64> = a.iter().collect();
        let second: Vec<f64> = (&a).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn copies_are_independent_values() {
        let a = Axis::uniform(3, 0.0, 3.0).unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        let c = Axis::from_edges(a.edges().to_vec()).unwrap();
        assert_eq!(a, c);
        assert_ne!(a, Axis::uniform(3, 0.0, 4.0).unwrap());
    }

    #[test]
    fn parses_from_shorthand() {
        let a: Axis = "(10,0,10) 11 (9,20,110) 120".parse().unwrap();
        assert_eq!(a.nbins(), 22);
        assert_eq!(a.find_bin_index(10.5), 11);
        assert_eq!(a.find_bin_index(11.0), 12);
        assert_eq!(a.find_bin_index(115.0), 22);

        let err = "(10,0,10) 5.5".parse::<Axis>().unwrap_err();
        assert!(matches!(err, Error::InvalidSpec(_)));
    }
}
