//! Human-readable console rendering

use crate::assumptions::AssumptionSheet;
use crate::projection::ProjectionPeriod;
use crate::valuation::{FcfSource, ValuationResult};
use std::fmt::Write;

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

/// Assumptions as loaded, in sheet order
pub fn render_assumptions(sheet: &AssumptionSheet) -> String {
    let mut out = String::from("*** Loaded Assumptions ***\n");
    if sheet.is_empty() {
        out.push_str("  (none; defaults apply)\n");
    }
    for (param, value) in &sheet.entries {
        let _ = writeln!(out, "  {}: {}", param, value);
    }
    out
}

/// First `rows` periods as a fixed-width table
pub fn render_preview(periods: &[ProjectionPeriod], rows: usize) -> String {
    let shown = rows.min(periods.len());
    let mut out = format!("*** Projections Data (first {} rows) ***\n", shown);
    let _ = writeln!(
        out,
        "{:>8} {:>16} {:>16} {:>16} {:>16} {:>16} {:>16}",
        "Year", "Revenue", "EBITDA", "Depreciation", "CapEx", "Change in NWC", "FCF"
    );
    out.push_str(&"-".repeat(110));
    out.push('\n');

    for period in periods.iter().take(rows) {
        let _ = writeln!(
            out,
            "{:>8} {:>16} {:>16} {:>16} {:>16} {:>16} {:>16}",
            period.year,
            cell(period.revenue),
            cell(period.ebitda),
            cell(period.depreciation),
            cell(period.capex),
            cell(period.change_in_nwc),
            cell(period.fcf),
        );
    }

    if periods.len() > shown {
        let _ = writeln!(out, "... ({} more periods)", periods.len() - shown);
    }
    out
}

/// The five valuation figures to 2 decimal places, followed by any warnings
pub fn render_summary(result: &ValuationResult) -> String {
    let mut out = String::from("*** DCF Valuation Results ***\n");
    let source = match result.fcf_source {
        FcfSource::Derived => "derived from EBITDA - Depreciation - CapEx - Change in NWC",
        FcfSource::Supplied => "supplied",
    };
    let _ = writeln!(out, "  Periods: {} (FCF {})", result.period_count(), source);

    for (metric, value) in result.summary_rows() {
        let _ = writeln!(out, "  {}: {:.2}", metric, value);
    }

    for warning in &result.warnings {
        let _ = writeln!(out, "  Warning: {}", warning);
    }
    out
}
