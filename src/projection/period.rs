//! Projection period records

use crate::error::{DcfError, DcfResult};
use serde::{Deserialize, Serialize};

pub const YEAR_COLUMN: &str = "Year";
pub const REVENUE_COLUMN: &str = "Revenue";
pub const EBITDA_COLUMN: &str = "EBITDA";
pub const DEPRECIATION_COLUMN: &str = "Depreciation";
pub const CAPEX_COLUMN: &str = "CapEx";
pub const CHANGE_IN_NWC_COLUMN: &str = "Change in NWC";
pub const FCF_COLUMN: &str = "FCF";
pub const DISCOUNTED_FCF_COLUMN: &str = "Discounted_FCF";

/// One forecast year of projected line items
///
/// Field names serialize to the sheet column headers so the same struct is
/// used for reading input rows and writing the detailed projections table.
/// `fcf` is optional on input; `discounted_fcf` is only set by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPeriod {
    /// Display label only; discounting order comes from sequence position
    #[serde(rename = "Year")]
    pub year: String,

    #[serde(rename = "Revenue", default)]
    pub revenue: Option<f64>,

    #[serde(rename = "EBITDA", default)]
    pub ebitda: Option<f64>,

    #[serde(rename = "Depreciation", default)]
    pub depreciation: Option<f64>,

    #[serde(rename = "CapEx", default)]
    pub capex: Option<f64>,

    #[serde(rename = "Change in NWC", default)]
    pub change_in_nwc: Option<f64>,

    #[serde(rename = "FCF", default)]
    pub fcf: Option<f64>,

    #[serde(rename = "Discounted_FCF", default)]
    pub discounted_fcf: Option<f64>,
}

impl ProjectionPeriod {
    /// Create a period from the four line items FCF is derived from
    pub fn new(
        year: impl Into<String>,
        ebitda: f64,
        depreciation: f64,
        capex: f64,
        change_in_nwc: f64,
    ) -> Self {
        Self {
            year: year.into(),
            ebitda: Some(ebitda),
            depreciation: Some(depreciation),
            capex: Some(capex),
            change_in_nwc: Some(change_in_nwc),
            ..Default::default()
        }
    }

    /// Create a period carrying a precomputed FCF
    pub fn with_fcf(year: impl Into<String>, fcf: f64) -> Self {
        Self {
            year: year.into(),
            fcf: Some(fcf),
            ..Default::default()
        }
    }

    pub fn revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    /// FCF = EBITDA - Depreciation - CapEx - Change in NWC
    ///
    /// `index` is the 0-based position used in error messages.
    pub fn derive_fcf(&self, index: usize) -> DcfResult<f64> {
        let require = |value: Option<f64>, field: &str| {
            value.ok_or_else(|| DcfError::missing_field(index, field))
        };

        let ebitda = require(self.ebitda, EBITDA_COLUMN)?;
        let depreciation = require(self.depreciation, DEPRECIATION_COLUMN)?;
        let capex = require(self.capex, CAPEX_COLUMN)?;
        let change_in_nwc = require(self.change_in_nwc, CHANGE_IN_NWC_COLUMN)?;

        Ok(ebitda - depreciation - capex - change_in_nwc)
    }

    /// Year label as an integer, if it is one ("2025" or "2025.0")
    pub fn year_number(&self) -> Option<i64> {
        let label = self.year.trim();
        if let Ok(year) = label.parse::<i64>() {
            return Some(year);
        }
        // Float labels only count while every integer is exactly representable
        const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
        match label.parse::<f64>() {
            Ok(y) if y.fract() == 0.0 && y.abs() <= MAX_EXACT => Some(y as i64),
            _ => None,
        }
    }

    /// Every numeric field that is present, paired with its column name
    pub fn numeric_fields(&self) -> [(&'static str, Option<f64>); 6] {
        [
            (REVENUE_COLUMN, self.revenue),
            (EBITDA_COLUMN, self.ebitda),
            (DEPRECIATION_COLUMN, self.depreciation),
            (CAPEX_COLUMN, self.capex),
            (CHANGE_IN_NWC_COLUMN, self.change_in_nwc),
            (FCF_COLUMN, self.fcf),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derive_fcf() {
        let period = ProjectionPeriod::new("2025", 1_000_000.0, 100_000.0, 200_000.0, 50_000.0);
        assert_relative_eq!(period.derive_fcf(0).unwrap(), 650_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_derive_fcf_negative_nwc_adds_back() {
        let period = ProjectionPeriod::new("2025", 500.0, 50.0, 100.0, -25.0);
        assert_relative_eq!(period.derive_fcf(0).unwrap(), 375.0, max_relative = 1e-9);
    }

    #[test]
    fn test_derive_fcf_missing_field() {
        let mut period = ProjectionPeriod::new("2026", 1.0, 1.0, 1.0, 1.0);
        period.capex = None;
        let err = period.derive_fcf(4).unwrap_err();
        assert!(err.is_invalid_input());
        let msg = err.to_string();
        assert!(msg.contains("CapEx"));
        assert!(msg.contains("period 4"));
    }

    #[test]
    fn test_year_number() {
        assert_eq!(ProjectionPeriod::with_fcf("2025", 1.0).year_number(), Some(2025));
        assert_eq!(ProjectionPeriod::with_fcf(" 2025.0 ", 1.0).year_number(), Some(2025));
        assert_eq!(ProjectionPeriod::with_fcf("2025E", 1.0).year_number(), None);
        assert_eq!(ProjectionPeriod::with_fcf("2025.5", 1.0).year_number(), None);
    }

    #[test]
    fn test_year_number_out_of_range_float_is_not_a_year() {
        assert_eq!(ProjectionPeriod::with_fcf("1e300", 1.0).year_number(), None);
        assert_eq!(ProjectionPeriod::with_fcf("-1e19", 1.0).year_number(), None);
        assert_eq!(ProjectionPeriod::with_fcf("inf", 1.0).year_number(), None);
        assert_eq!(
            ProjectionPeriod::with_fcf("9223372036854775807", 1.0).year_number(),
            Some(i64::MAX)
        );
    }
}
