//! DCF Valuation - discounted cash flow engine with Gordon Growth terminal value
//!
//! This library provides:
//! - Typed valuation assumptions with documented defaults
//! - Workbook loading (spreadsheets, CSV sheet directories and JSON workbooks)
//! - FCF derivation, per-period discounting, terminal value and aggregation
//! - Console and file reports for the result

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod valuation;
pub mod workbook;
pub mod report;

// Re-export commonly used types
pub use error::{DcfError, DcfResult};
pub use assumptions::Assumptions;
pub use projection::ProjectionPeriod;
pub use valuation::{calculate_dcf, ValuationConfig, ValuationEngine, ValuationResult};
pub use workbook::Workbook;
