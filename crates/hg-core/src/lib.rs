//! # hg-core
//!
//! Shared building blocks for the histograms workspace:
//! - the [`Error`] type and [`Result`] alias used by every crate,
//! - the bin-content contract ([`Accumulate`], [`Materialize`], [`Merge`]),
//! - standard bin types ([`WeightBin`], [`McBin`], [`StatBin`]).
//!
//! Any `Default` type implementing [`Accumulate`] can be used as histogram bin
//! content; primitive numbers and `Vec<T>` work out of the box.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bins;
pub mod error;
pub mod traits;

pub use bins::{McBin, StatBin, WeightBin};
pub use error::{Error, Result};
pub use traits::{Accumulate, Materialize, Merge};
