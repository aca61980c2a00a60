//! Bin content chosen at runtime.
//!
//! [`Histogram<B>`] fixes its bin type at compile time. Configuration files and
//! other host-facing entry points name the bin type as a string instead;
//! [`BinType`] is that name and [`AnyHistogram`] the histogram built from it.

use std::fmt;
use std::str::FromStr;

use hg_core::{Error, Materialize, McBin, Result, StatBin, WeightBin};
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::histogram::Histogram;

/// Bin-content types selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinType {
    /// `f64` counter / sum of weights.
    #[default]
    #[serde(alias = "float", alias = "f64")]
    Double,
    /// `u64` counter.
    #[serde(alias = "u64")]
    Int,
    /// [`WeightBin`]: sum of weights and of squared weights.
    #[serde(alias = "ww2")]
    Weight,
    /// [`McBin`]: [`WeightBin`] plus the raw entry count.
    Mc,
    /// [`StatBin`]: running mean and variance of the filled values.
    Stat,
    /// `Vec<f64>`: every filled value.
    List,
}

impl BinType {
    /// All bin types, in declaration order.
    pub const ALL: [BinType; 6] = [
        BinType::Double,
        BinType::Int,
        BinType::Weight,
        BinType::Mc,
        BinType::Stat,
        BinType::List,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            BinType::Double => "double",
            BinType::Int => "int",
            BinType::Weight => "weight",
            BinType::Mc => "mc",
            BinType::Stat => "stat",
            BinType::List => "list",
        }
    }
}

impl fmt::Display for BinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double" | "float" | "f64" => Ok(BinType::Double),
            "int" | "u64" => Ok(BinType::Int),
            "weight" | "ww2" => Ok(BinType::Weight),
            "mc" => Ok(BinType::Mc),
            "stat" => Ok(BinType::Stat),
            "list" => Ok(BinType::List),
            other => Err(Error::IncompatibleBinType(format!("unknown bin type '{other}'"))),
        }
    }
}

/// Histogram whose bin type is a [`BinType`] value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyHistogram {
    /// `f64` bins.
    Double(Histogram<f64>),
    /// `u64` bins.
    Int(Histogram<u64>),
    /// [`WeightBin`] bins.
    Weight(Histogram<WeightBin>),
    /// [`McBin`] bins.
    Mc(Histogram<McBin>),
    /// [`StatBin`] bins.
    Stat(Histogram<StatBin>),
    /// `Vec<f64>` bins.
    List(Histogram<Vec<f64>>),
}

macro_rules! dispatch {
    ($value:expr, $h:ident => $body:expr) => {
        match $value {
            AnyHistogram::Double($h) => $body,
            AnyHistogram::Int($h) => $body,
            AnyHistogram::Weight($h) => $body,
            AnyHistogram::Mc($h) => $body,
            AnyHistogram::Stat($h) => $body,
            AnyHistogram::List($h) => $body,
        }
    };
}

fn count_weight(value: f64) -> Result<u64> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(Error::IncompatibleBinType(format!(
            "int bins take non-negative integral weights, got {value}"
        )))
    }
}

/// Counts from real-valued bins, rounded to the nearest integer; negative
/// values and NaN become 0.
fn rounded_counts<B>(h: &Histogram<B>) -> Histogram<u64>
where
    B: Materialize<Value = f64>,
{
    h.map_bins(|bin| bin.materialize().round() as u64)
}

fn incompatible(from: BinType, to: BinType) -> Error {
    Error::IncompatibleBinType(format!("cannot convert {from} bins to {to} bins"))
}

impl AnyHistogram {
    /// Empty histogram with the given axes and bin type.
    pub fn new(axes: impl Into<Vec<Axis>>, bin_type: BinType) -> Result<Self> {
        let axes = axes.into();
        Ok(match bin_type {
            BinType::Double => AnyHistogram::Double(Histogram::new(axes)?),
            BinType::Int => AnyHistogram::Int(Histogram::new(axes)?),
            BinType::Weight => AnyHistogram::Weight(Histogram::new(axes)?),
            BinType::Mc => AnyHistogram::Mc(Histogram::new(axes)?),
            BinType::Stat => AnyHistogram::Stat(Histogram::new(axes)?),
            BinType::List => AnyHistogram::List(Histogram::new(axes)?),
        })
    }

    /// Bin type of this histogram.
    pub fn bin_type(&self) -> BinType {
        match self {
            AnyHistogram::Double(_) => BinType::Double,
            AnyHistogram::Int(_) => BinType::Int,
            AnyHistogram::Weight(_) => BinType::Weight,
            AnyHistogram::Mc(_) => BinType::Mc,
            AnyHistogram::Stat(_) => BinType::Stat,
            AnyHistogram::List(_) => BinType::List,
        }
    }

    /// Axes in declaration order.
    pub fn axes(&self) -> &[Axis] {
        dispatch!(self, h => h.axes())
    }

    /// Number of axes.
    pub fn naxes(&self) -> usize {
        dispatch!(self, h => h.naxes())
    }

    /// Total number of bins, pseudo-bins included.
    pub fn size(&self) -> usize {
        dispatch!(self, h => h.size())
    }

    /// Flat index of the bin containing `coords`.
    pub fn find_bin_index(&self, coords: &[f64]) -> Result<usize> {
        dispatch!(self, h => h.find_bin_index(coords))
    }

    /// Count one occurrence at `coords`.
    ///
    /// `Stat` and `List` bins need a value and reject a bare count.
    pub fn fill(&mut self, coords: &[f64]) -> Result<()> {
        let bin_type = self.bin_type();
        match self {
            AnyHistogram::Double(h) => h.fill(coords).map(drop),
            AnyHistogram::Int(h) => h.fill(coords).map(drop),
            AnyHistogram::Weight(h) => h.fill(coords).map(drop),
            AnyHistogram::Mc(h) => h.fill(coords).map(drop),
            AnyHistogram::Stat(_) | AnyHistogram::List(_) => Err(Error::IncompatibleBinType(
                format!("{bin_type} bins cannot be filled without a value"),
            )),
        }
    }

    /// Fill `value` at `coords`: a weight for counters, the sample for
    /// `Stat` and `List` bins.
    ///
    /// `Int` bins only take non-negative integral weights.
    pub fn fill_with(&mut self, coords: &[f64], value: f64) -> Result<()> {
        match self {
            AnyHistogram::Double(h) => h.fill_with(coords, value).map(drop),
            AnyHistogram::Int(h) => h.fill_with(coords, count_weight(value)?).map(drop),
            AnyHistogram::Weight(h) => h.fill_with(coords, value).map(drop),
            AnyHistogram::Mc(h) => h.fill_with(coords, value).map(drop),
            AnyHistogram::Stat(h) => h.fill_with(coords, value).map(drop),
            AnyHistogram::List(h) => h.fill_with(coords, value).map(drop),
        }
    }

    /// Copy with every bin converted to `target`.
    ///
    /// Fails with [`Error::IncompatibleBinType`] when the target bin cannot
    /// absorb the source's materialized value (`int → list`, and `list` into
    /// anything but a counter). Real values converted to `int` are rounded.
    pub fn convert(&self, target: BinType) -> Result<AnyHistogram> {
        use AnyHistogram as H;

        let source = self.bin_type();
        if source == target {
            return Ok(self.clone());
        }
        Ok(match (self, target) {
            (H::Double(h), BinType::Int) => H::Int(rounded_counts(h)),
            (H::Double(h), BinType::Weight) => H::Weight(h.convert()),
            (H::Double(h), BinType::Mc) => H::Mc(h.convert()),
            (H::Double(h), BinType::Stat) => H::Stat(h.convert()),
            (H::Double(h), BinType::List) => H::List(h.convert()),

            (H::Int(h), BinType::Double) => H::Double(h.convert()),
            (H::Int(h), BinType::Weight) => H::Weight(h.convert()),
            (H::Int(h), BinType::Mc) => H::Mc(h.convert()),
            (H::Int(h), BinType::Stat) => H::Stat(h.convert()),

            (H::Weight(h), BinType::Double) => H::Double(h.convert()),
            (H::Weight(h), BinType::Int) => H::Int(rounded_counts(h)),
            (H::Weight(h), BinType::Mc) => H::Mc(h.convert()),
            (H::Weight(h), BinType::Stat) => H::Stat(h.convert()),
            (H::Weight(h), BinType::List) => H::List(h.convert()),

            (H::Mc(h), BinType::Double) => H::Double(h.convert()),
            (H::Mc(h), BinType::Int) => H::Int(rounded_counts(h)),
            (H::Mc(h), BinType::Weight) => H::Weight(h.convert()),
            (H::Mc(h), BinType::Stat) => H::Stat(h.convert()),
            (H::Mc(h), BinType::List) => H::List(h.convert()),

            (H::Stat(h), BinType::Double) => H::Double(h.convert()),
            (H::Stat(h), BinType::Int) => H::Int(rounded_counts(h)),
            (H::Stat(h), BinType::Weight) => H::Weight(h.convert()),
            (H::Stat(h), BinType::Mc) => H::Mc(h.convert()),
            (H::Stat(h), BinType::List) => H::List(h.convert()),

            (H::List(h), BinType::Double) => H::Double(h.convert()),
            (H::List(h), BinType::Int) => H::Int(h.convert()),

            _ => return Err(incompatible(source, target)),
        })
    }

    /// One number per bin in flat order: the value a `Double` histogram would
    /// hold after conversion (`w` for weighted bins, the total for `Stat`,
    /// the entry count for `List`).
    pub fn scalar_values(&self) -> Vec<f64> {
        match self {
            AnyHistogram::Double(h) => h.bins().to_vec(),
            AnyHistogram::Int(h) => h.iter().map(|&n| n as f64).collect(),
            AnyHistogram::Weight(h) => h.iter().map(|b| b.w).collect(),
            AnyHistogram::Mc(h) => h.iter().map(|b| b.w).collect(),
            AnyHistogram::Stat(h) => h.iter().map(StatBin::total).collect(),
            AnyHistogram::List(h) => h.iter().map(|v| v.len() as f64).collect(),
        }
    }
}

macro_rules! impl_from_histogram {
    ($($variant:ident => $b:ty),* $(,)?) => {
        $(
            impl From<Histogram<$b>> for AnyHistogram {
                fn from(h: Histogram<$b>) -> Self {
                    AnyHistogram::$variant(h)
                }
            }
        )*
    };
}

impl_from_histogram!(
    Double => f64,
    Int => u64,
    Weight => WeightBin,
    Mc => McBin,
    Stat => StatBin,
    List => Vec<f64>,
);
