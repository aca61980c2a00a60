//! # hg-hist
//!
//! Multi-dimensional histograms with pluggable bin content.
//!
//! - [`Axis`]: strictly increasing bin edges with underflow/overflow
//!   pseudo-bins, built from uniform ranges, explicit edges, segment lists
//!   ([`AxisSpec`], [`Segment`]) or the compact [`shorthand`] syntax.
//! - [`Histogram<B>`]: dense storage of `∏(nbins + 2)` bins of any type `B`
//!   implementing [`hg_core::Accumulate`].
//! - [`AnyHistogram`] / [`BinType`]: bin content chosen at runtime, e.g. from a
//!   [`HistogramConfig`].
//!
//! ```
//! use hg_hist::{Axis, Histogram};
//!
//! let mut h: Histogram = Histogram::new(vec![
//!     Axis::uniform(5, 0.0, 10.0)?,
//!     Axis::uniform(11, 0.0, 11.0)?,
//! ])?;
//! h.fill([1.5, 3.5])?;
//! assert_eq!(h.join_index([1, 4])?, h.find_bin_index([1.5, 3.5])?);
//! # Ok::<(), hg_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod axis;
pub mod config;
pub mod dynamic;
pub mod histogram;
pub mod shorthand;
pub mod spec;

pub use args::AxisArgs;
pub use axis::Axis;
pub use config::HistogramConfig;
pub use dynamic::{AnyHistogram, BinType};
pub use histogram::Histogram;
pub use spec::{AxisSpec, Segment};

pub use hg_core::{Accumulate, Error, Materialize, McBin, Merge, Result, StatBin, WeightBin};
