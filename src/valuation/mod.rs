//! Discounted cash flow valuation
//!
//! The engine is a pure computation over a projection sequence and resolved
//! assumptions:
//! 1. **FCF**: derived per period unless the FCF column is supplied
//! 2. **Discounting**: period at position i is discounted i + 1 years
//! 3. **Terminal value**: Gordon Growth on the last period's FCF
//! 4. **Aggregation**: enterprise value and equity value
//!
//! # Example
//!
//! ```rust
//! use dcf_valuation::{Assumptions, ProjectionPeriod};
//! use dcf_valuation::valuation::{ValuationConfig, ValuationEngine};
//!
//! let engine = ValuationEngine::new(
//!     Assumptions::new(0.10, 0.02, 5_000_000.0),
//!     ValuationConfig::default(),
//! );
//! let periods = vec![ProjectionPeriod::new("2025", 1_000_000.0, 100_000.0, 200_000.0, 50_000.0)];
//! let result = engine.value(&periods).unwrap();
//! assert!((result.equity_value - 3_125_000.0).abs() < 1e-6);
//! ```

mod discount;
mod engine;
mod result;
mod terminal;

pub use discount::DiscountCurve;
pub use engine::{calculate_dcf, ValuationConfig, ValuationEngine, YearCheck};
pub use result::{FcfSource, ValuationResult, ValuationWarning};
pub use terminal::gordon_growth_value;
