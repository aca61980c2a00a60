//! Axis specifications and their normalization into edges.
//!
//! An axis can be described in several ways. All of them end up as one
//! strictly increasing edge list:
//!
//! - [`AxisSpec::Uniform`]: `nbins` equal bins over `[low, high]`.
//! - [`AxisSpec::Edges`]: explicit edges.
//! - [`AxisSpec::Segments`]: concatenated [`Segment`]s, for piecewise-uniform
//!   or irregular layouts.
//! - [`AxisSpec::Shorthand`]: the compact text form parsed by
//!   [`crate::shorthand`], e.g. `"0 (5,10) (2,20)"`.
//!
//! Consecutive segments may share their junction edge; the shared value is kept
//! once and belongs to the upper segment's first bin. Any other repeated or
//! decreasing edge is an [`Error::InvalidSpec`].

use std::str::FromStr;

use hg_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::axis::Axis;

/// Largest bin count accepted for a single segment.
pub const MAX_SEGMENT_BINS: usize = 1 << 24;

/// One piece of a composite axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// A single edge.
    Edge(f64),
    /// Explicit edges.
    Edges(Vec<f64>),
    /// `nbins` equal bins over `[low, high]` (a reversed range is swapped).
    Uniform {
        /// Number of bins in the segment.
        nbins: usize,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// `nbins` equal bins from the previous edge up to `high`.
    Step {
        /// Number of bins in the segment.
        nbins: usize,
        /// Upper bound.
        high: f64,
    },
}

/// Description of one axis, in any of the accepted forms.
///
/// Deserializes (untagged) from a list of numbers, `{"nbins": n, "low": a,
/// "high": b}`, a list of segments, or a shorthand string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec {
    // Must precede `Uniform`: serde accepts `[n, low, high]` as a struct in sequence form.
    /// Explicit edges.
    Edges(Vec<f64>),
    /// `nbins` equal bins over `[low, high]`.
    Uniform {
        /// Number of bins.
        nbins: usize,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// Concatenated segments.
    Segments(Vec<Segment>),
    /// Text shorthand, see [`crate::shorthand`].
    Shorthand(String),
}

impl AxisSpec {
    /// Uniform spec.
    pub fn uniform(nbins: usize, low: f64, high: f64) -> Self {
        AxisSpec::Uniform { nbins, low, high }
    }

    /// Explicit-edges spec.
    pub fn edges(edges: impl Into<Vec<f64>>) -> Self {
        AxisSpec::Edges(edges.into())
    }

    /// Normalize and validate into an [`Axis`].
    pub fn build(&self) -> Result<Axis> {
        match self {
            AxisSpec::Edges(edges) => Axis::from_edges(edges.clone()),
            AxisSpec::Uniform { nbins, low, high } => Axis::uniform(*nbins, *low, *high),
            AxisSpec::Segments(segments) => Axis::from_segments(segments),
            AxisSpec::Shorthand(text) => text.parse::<AxisSpec>()?.build(),
        }
    }
}

impl FromStr for AxisSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::shorthand::parse_segments(s).map(AxisSpec::Segments)
    }
}

impl From<&Axis> for AxisSpec {
    fn from(axis: &Axis) -> Self {
        AxisSpec::Edges(axis.edges().to_vec())
    }
}

/// Check that `edges` can back an [`Axis`].
pub(crate) fn validate_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(Error::InvalidSpec(format!(
            "an axis needs at least 2 edges, got {}",
            edges.len()
        )));
    }
    for (i, &e) in edges.iter().enumerate() {
        if !e.is_finite() {
            return Err(Error::InvalidSpec(format!("edge[{i}] must be finite, got {e}")));
        }
    }
    for (i, pair) in edges.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(Error::InvalidSpec(format!(
                "edges must be strictly increasing, got edge[{}]={} and edge[{}]={}",
                i,
                pair[0],
                i + 1,
                pair[1]
            )));
        }
    }
    Ok(())
}

/// Concatenate segments into one validated edge list.
pub(crate) fn expand_segments(segments: &[Segment]) -> Result<Vec<f64>> {
    let mut edges: Vec<f64> = Vec::new();
    for (k, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Edge(x) => push_edge(&mut edges, *x, true)?,
            Segment::Edges(xs) => {
                for (i, &x) in xs.iter().enumerate() {
                    push_edge(&mut edges, x, i == 0)?;
                }
            }
            Segment::Uniform { nbins, low, high } => {
                check_nbins(k, *nbins)?;
                let (low, high) = uniform_range(k, *low, *high)?;
                push_edge(&mut edges, low, true)?;
                push_uniform(&mut edges, *nbins, low, high)?;
            }
            Segment::Step { nbins, high } => {
                check_nbins(k, *nbins)?;
                let low = *edges.last().ok_or_else(|| {
                    Error::InvalidSpec(format!(
                        "segment {k}: a ({nbins}, {high}) step needs a preceding edge"
                    ))
                })?;
                if !high.is_finite() || *high <= low {
                    return Err(Error::InvalidSpec(format!(
                        "segment {k}: step upper bound {high} must be finite and above {low}"
                    )));
                }
                push_uniform(&mut edges, *nbins, low, *high)?;
            }
        }
    }
    validate_edges(&edges)?;
    Ok(edges)
}

fn check_nbins(segment: usize, nbins: usize) -> Result<()> {
    if nbins < 1 {
        return Err(Error::InvalidSpec(format!("segment {segment}: bin count must be >= 1")));
    }
    if nbins > MAX_SEGMENT_BINS {
        return Err(Error::InvalidSpec(format!(
            "segment {segment}: bin count {nbins} exceeds the limit of {MAX_SEGMENT_BINS}"
        )));
    }
    Ok(())
}

fn uniform_range(segment: usize, low: f64, high: f64) -> Result<(f64, f64)> {
    if !low.is_finite() || !high.is_finite() {
        return Err(Error::InvalidSpec(format!(
            "segment {segment}: range bounds must be finite, got ({low}, {high})"
        )));
    }
    if low == high {
        return Err(Error::InvalidSpec(format!(
            "segment {segment}: empty range ({low}, {high})"
        )));
    }
    if low > high {
        log::warn!("segment {segment}: reversed range ({low}, {high}) swapped");
        return Ok((high, low));
    }
    Ok((low, high))
}

/// Append the `nbins` upper edges of a uniform split of `[low, high]`;
/// `low` must already be the last edge.
///
/// Each edge is computed from its own index so rounding does not accumulate:
/// `(10, 0, 1)` yields exactly the literals `0.1, 0.2, ..., 0.9`.
fn push_uniform(edges: &mut Vec<f64>, nbins: usize, low: f64, high: f64) -> Result<()> {
    edges.try_reserve(nbins).map_err(|e| {
        Error::InvalidSpec(format!("cannot allocate {nbins} uniform bins: {e}"))
    })?;
    let span = high - low;
    let n = nbins as f64;
    for i in 1..nbins {
        push_edge(edges, low + span * i as f64 / n, false)?;
    }
    push_edge(edges, high, false)
}

fn push_edge(edges: &mut Vec<f64>, x: f64, junction: bool) -> Result<()> {
    if !x.is_finite() {
        return Err(Error::InvalidSpec(format!("edge {} must be finite, got {x}", edges.len())));
    }
    if let Some(&last) = edges.last() {
        if junction && x == last {
            return Ok(());
        }
        if x <= last {
            return Err(Error::InvalidSpec(format!(
                "edges must be strictly increasing, got {last} followed by {x}"
            )));
        }
    }
    edges.push(x);
    Ok(())
}
