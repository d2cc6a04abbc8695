//! Annual discounting for explicit forecast periods
//!
//! Period `t` is the 1-based position in the projection sequence; the `Year`
//! label plays no part here.

use serde::{Deserialize, Serialize};

/// Flat annual discount curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Annual discount rate as a fraction
    pub annual_rate: f64,
}

impl DiscountCurve {
    /// Create a curve with a single annual rate
    pub fn single_rate(annual_rate: f64) -> Self {
        Self { annual_rate }
    }

    /// (1 + r)^t, the divisor applied to a cash flow received at period t
    pub fn compound_factor(&self, period: u32) -> f64 {
        (1.0 + self.annual_rate).powi(period as i32)
    }

    /// Present value of `amount` received at the end of `period`
    pub fn discount(&self, amount: f64, period: u32) -> f64 {
        amount / self.compound_factor(period)
    }

    /// Present value of each element of a stream, where element i falls in
    /// period i + 1
    pub fn discount_stream(&self, amounts: &[f64]) -> Vec<f64> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| self.discount(*amount, i as u32 + 1))
            .collect()
    }
}
