//! Valuation assumptions: discount rate, terminal growth and net debt

pub mod loader;

pub use loader::{
    assumption_sheet_from_table, load_assumption_sheet, load_assumption_sheet_from_reader,
    AssumptionSheet,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discount rate used when the workbook does not supply one (10%)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Perpetual growth rate used when the workbook does not supply one (2%)
pub const DEFAULT_TERMINAL_GROWTH_RATE: f64 = 0.02;

/// Net debt used when the workbook does not supply one
pub const DEFAULT_NET_DEBT: f64 = 0.0;

pub const KEY_DISCOUNT_RATE: &str = "discount_rate";
pub const KEY_TERMINAL_GROWTH_RATE: &str = "terminal_growth_rate";
pub const KEY_NET_DEBT: &str = "net_debt";

/// Resolved valuation assumptions
///
/// Built once from the loosely keyed assumption sheet. Keys the engine does
/// not recognise are kept in `extra` so they can be echoed back in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Annual discount rate as a fraction (0.10 = 10%)
    pub discount_rate: f64,

    /// Perpetual growth rate after the forecast horizon, as a fraction
    pub terminal_growth_rate: f64,

    /// Debt minus cash; negative for a net cash position
    pub net_debt: f64,

    /// Unrecognised parameters, preserved but unused
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, f64>,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            terminal_growth_rate: DEFAULT_TERMINAL_GROWTH_RATE,
            net_debt: DEFAULT_NET_DEBT,
            extra: BTreeMap::new(),
        }
    }
}

impl Assumptions {
    /// Create assumptions with explicit values and no extra parameters
    pub fn new(discount_rate: f64, terminal_growth_rate: f64, net_debt: f64) -> Self {
        Self {
            discount_rate,
            terminal_growth_rate,
            net_debt,
            extra: BTreeMap::new(),
        }
    }

    /// Build from parameter/value pairs, substituting defaults for missing keys.
    /// A repeated parameter takes its last value.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut assumptions = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                KEY_DISCOUNT_RATE => assumptions.discount_rate = value,
                KEY_TERMINAL_GROWTH_RATE => assumptions.terminal_growth_rate = value,
                KEY_NET_DEBT => assumptions.net_debt = value,
                other => {
                    assumptions.extra.insert(other.to_string(), value);
                }
            }
        }
        assumptions
    }

    /// Build from a name -> value mapping
    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        Self::from_pairs(map.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    /// The three scalars the engine consumes: (discount_rate, terminal_growth_rate, net_debt)
    pub fn resolve(&self) -> (f64, f64, f64) {
        (self.discount_rate, self.terminal_growth_rate, self.net_debt)
    }
}
