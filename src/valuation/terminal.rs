//! Gordon Growth terminal value

use crate::error::{DcfError, DcfResult};

/// Value at the end of the horizon of a cash flow growing at `growth_rate` forever
///
/// TV = last_fcf * (1 + g) / (r - g)
///
/// Fails when r == g. A growth rate above the discount rate gives a negative
/// value, which is returned as-is.
pub fn gordon_growth_value(last_fcf: f64, discount_rate: f64, growth_rate: f64) -> DcfResult<f64> {
    let spread = discount_rate - growth_rate;
    if spread == 0.0 {
        return Err(DcfError::InvalidAssumption(format!(
            "discount_rate ({}) equals terminal_growth_rate ({}); terminal value is undefined",
            discount_rate, growth_rate
        )));
    }

    let value = last_fcf * (1.0 + growth_rate) / spread;
    if !value.is_finite() {
        return Err(DcfError::InvalidAssumption(format!(
            "terminal value is not finite for discount_rate {} and terminal_growth_rate {}",
            discount_rate, growth_rate
        )));
    }

    Ok(value)
}
