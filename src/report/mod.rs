//! Report rendering for valuation results

mod console;
mod writer;
mod xlsx;

pub use console::{render_assumptions, render_preview, render_summary};
pub use writer::{CsvReportSink, JsonReportSink, ReportSink, DETAILED_PROJECTIONS_SHEET, SUMMARY_SHEET};
pub use xlsx::{XlsxReportSink, DETAILED_PROJECTIONS_WORKSHEET, SUMMARY_WORKSHEET};
