//! Error types for the histograms workspace

use thiserror::Error;

/// Histogram engine error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed axis specification (edges not strictly increasing, empty segments, ...)
    #[error("Invalid axis spec: {0}")]
    InvalidSpec(String),

    /// Number of coordinates or indices does not match the number of axes
    #[error("Dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch {
        /// Number of axes of the histogram.
        expected: usize,
        /// Number of values supplied by the caller.
        got: usize,
    },

    /// Axis selector or bin index outside of its valid range
    #[error("Index out of range: {what} index {index} not in [0, {len})")]
    IndexOutOfRange {
        /// What was being indexed (`"axis"`, `"bin"`, ...).
        what: &'static str,
        /// The offending index as supplied.
        index: i64,
        /// Number of valid positions.
        len: usize,
    },

    /// Requested bin-content type cannot be built from the available values
    #[error("Incompatible bin type: {0}")]
    IncompatibleBinType(String),

    /// Two histograms with different axes were combined
    #[error("Axis mismatch: {0}")]
    AxisMismatch(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::IndexOutOfRange`] on an unsigned index.
    pub fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { what, index: i64::try_from(index).unwrap_or(i64::MAX), len }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
