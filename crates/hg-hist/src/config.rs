//! JSON description of a histogram: its axes and bin type.
//!
//! ```json
//! {
//!   "axes": [
//!     {"nbins": 10, "low": 0.0, "high": 1.0},
//!     [0.0, 1.0, 2.0, 4.0],
//!     "0 (5, 10) (2, 20)"
//!   ],
//!   "bin_type": "weight"
//! }
//! ```
//!
//! This is an input description only; filled histograms are not serialized.

use hg_core::Result;
use serde::{Deserialize, Serialize};

use crate::dynamic::{AnyHistogram, BinType};
use crate::spec::AxisSpec;

/// Axes and bin type of a histogram to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// One spec per axis, in order.
    pub axes: Vec<AxisSpec>,
    /// Bin-content type; `double` when omitted.
    #[serde(default)]
    pub bin_type: BinType,
}

impl HistogramConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the empty histogram described by this configuration.
    pub fn build(&self) -> Result<AnyHistogram> {
        let axes = self.axes.iter().map(AxisSpec::build).collect::<Result<Vec<_>>>()?;
        log::debug!("building {} histogram over {} axes", self.bin_type, axes.len());
        AnyHistogram::new(axes, self.bin_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hg_core::Error;

    #[test]
    fn parse_and_build() {
        let cfg = HistogramConfig::from_json_str(
            r#"{
                "axes": [
                    {"nbins": 10, "low": 0.0, "high": 1.0},
                    [0.0, 1.0, 2.0, 4.0],
                    "0 (5, 10) (2, 20)"
                ],
                "bin_type": "weight"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.bin_type, BinType::Weight);
        let h = cfg.build().unwrap();
        assert_eq!(h.bin_type(), BinType::Weight);
        let nbins: Vec<usize> = h.axes().iter().map(|a| a.nbins()).collect();
        assert_eq!(nbins, vec![10, 3, 7]);
        assert_eq!(h.size(), 12 * 5 * 9);
    }

    #[test]
    fn bin_type_defaults_to_double() {
        let cfg = HistogramConfig::from_json_str(r#"{"axes": [[0, 1]]}"#).unwrap();
        assert_eq!(cfg.bin_type, BinType::Double);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(HistogramConfig::from_json_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn huge_bin_count_fails_build() {
        let cfg = HistogramConfig::from_json_str(
            r#"{"axes": [{"nbins": 18446744073709551615, "low": 0, "high": 1}]}"#,
        )
        .unwrap();
        assert!(matches!(cfg.build(), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn invalid_axis_fails_build() {
        let cfg = HistogramConfig::from_json_str(r#"{"axes": [[1.0, 0.0]]}"#).unwrap();
        assert!(matches!(cfg.build(), Err(Error::InvalidSpec(_))));
        let none = HistogramConfig { axes: Vec::new(), bin_type: BinType::Int };
        assert!(matches!(none.build(), Err(Error::InvalidSpec(_))));
    }
}
