//! Valuation output structures

use crate::assumptions::Assumptions;
use crate::projection::ProjectionPeriod;
use serde::{Deserialize, Serialize};

/// Where each period's FCF came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FcfSource {
    /// Computed as EBITDA - Depreciation - CapEx - Change in NWC
    Derived,
    /// Taken from the FCF column without recomputation
    Supplied,
}

/// Economically suspect but computable conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValuationWarning {
    /// g > r, so the terminal value came out with the opposite sign of the last FCF
    GrowthExceedsDiscountRate {
        discount_rate: f64,
        terminal_growth_rate: f64,
    },
}

impl std::fmt::Display for ValuationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValuationWarning::GrowthExceedsDiscountRate {
                discount_rate,
                terminal_growth_rate,
            } => write!(
                f,
                "terminal growth rate {} exceeds discount rate {}; terminal value is not meaningful",
                terminal_growth_rate, discount_rate
            ),
        }
    }
}

/// Complete valuation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Assumptions the valuation was run with
    pub assumptions: Assumptions,

    pub fcf_source: FcfSource,

    /// Sum of discounted explicit-period FCF
    pub discounted_fcf_total: f64,

    /// Gordon Growth value at the end of the horizon (undiscounted)
    pub terminal_value: f64,

    /// Terminal value discounted back N periods
    pub terminal_value_discounted: f64,

    pub enterprise_value: f64,

    /// Enterprise value less net debt
    pub equity_value: f64,

    /// Working copy of the input periods with FCF and Discounted_FCF filled in
    pub projections: Vec<ProjectionPeriod>,

    #[serde(default)]
    pub warnings: Vec<ValuationWarning>,
}

impl ValuationResult {
    /// Metric name / value rows in report order
    pub fn summary_rows(&self) -> [(&'static str, f64); 5] {
        [
            ("Total Discounted FCF", self.discounted_fcf_total),
            ("Terminal Value", self.terminal_value),
            ("Discounted Terminal Value", self.terminal_value_discounted),
            ("Enterprise Value", self.enterprise_value),
            ("Equity Value", self.equity_value),
        ]
    }

    pub fn period_count(&self) -> usize {
        self.projections.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
