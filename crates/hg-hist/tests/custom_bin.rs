//! User-defined bin content plugs in through the accumulation traits.

use hg_hist::{Accumulate, Axis, Histogram, Materialize, Merge};

/// Smallest and largest value seen.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extremes {
    lo: f64,
    hi: f64,
}

impl Default for Extremes {
    fn default() -> Self {
        Self { lo: f64::INFINITY, hi: f64::NEG_INFINITY }
    }
}

impl Accumulate<f64> for Extremes {
    fn accumulate(&mut self, x: f64) {
        self.lo = self.lo.min(x);
        self.hi = self.hi.max(x);
    }
}

impl Materialize for Extremes {
    type Value = f64;

    fn materialize(&self) -> f64 {
        if self.hi >= self.lo { self.hi - self.lo } else { 0.0 }
    }
}

impl Merge for Extremes {
    fn merge(&mut self, other: &Self) {
        self.lo = self.lo.min(other.lo);
        self.hi = self.hi.max(other.hi);
    }
}

#[test]
fn custom_bin_fill_and_read() {
    let mut h: Histogram<Extremes> = Histogram::new(vec![Axis::uniform(2, 0.0, 2.0).unwrap()]).unwrap();
    for (x, v) in [(0.5, 3.0), (0.2, -1.0), (1.5, 7.0)] {
        h.fill_with(x, v).unwrap();
    }
    let updated = *h.fill_with(0.9, 10.0).unwrap();
    assert_eq!(updated, Extremes { lo: -1.0, hi: 10.0 });
    assert_eq!(*h.find_bin(1.5).unwrap(), Extremes { lo: 7.0, hi: 7.0 });
    assert_eq!(*h.at(0).unwrap(), Extremes::default());

    let spans: Histogram<f64> = h.convert();
    assert_eq!(spans.bins(), &[0.0, 11.0, 0.0, 0.0]);
}

#[test]
fn custom_bin_merge() {
    let axes = vec![Axis::uniform(2, 0.0, 2.0).unwrap()];
    let mut a: Histogram<Extremes> = Histogram::new(axes.clone()).unwrap();
    let mut b: Histogram<Extremes> = Histogram::new(axes).unwrap();
    a.fill_with(0.5, 1.0).unwrap();
    b.fill_with(0.5, 4.0).unwrap();
    a.merge(&b).unwrap();
    assert_eq!(*a.find_bin(0.5).unwrap(), Extremes { lo: 1.0, hi: 4.0 });
}

#[test]
fn tuple_values_in_collections() {
    let mut h: Histogram<Vec<(f64, u32)>> = Histogram::new(vec![
        Axis::uniform(2, 0.0, 1.0).unwrap(),
        Axis::uniform(2, 0.0, 1.0).unwrap(),
    ])
    .unwrap();
    h.fill_with([0.1, 0.9], (2.5, 7)).unwrap();
    h.fill_with([0.1, 0.9], (0.5, 1)).unwrap();
    assert_eq!(h.find_bin([0.1, 0.9]).unwrap(), &vec![(2.5, 7), (0.5, 1)]);

    let counts: Histogram<usize> = h.convert();
    assert_eq!(*counts.find_bin([0.1, 0.9]).unwrap(), 2);
}
