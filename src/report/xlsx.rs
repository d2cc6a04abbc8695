//! Spreadsheet report: `Detailed_Projections` and `Summary` sheets

use super::writer::ReportSink;
use crate::error::DcfResult;
use crate::projection::{
    ProjectionPeriod, CAPEX_COLUMN, CHANGE_IN_NWC_COLUMN, DEPRECIATION_COLUMN,
    DISCOUNTED_FCF_COLUMN, EBITDA_COLUMN, FCF_COLUMN, REVENUE_COLUMN, YEAR_COLUMN,
};
use crate::valuation::ValuationResult;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::PathBuf;

pub const DETAILED_PROJECTIONS_WORKSHEET: &str = "Detailed_Projections";
pub const SUMMARY_WORKSHEET: &str = "Summary";

const PROJECTION_HEADERS: [&str; 8] = [
    YEAR_COLUMN,
    REVENUE_COLUMN,
    EBITDA_COLUMN,
    DEPRECIATION_COLUMN,
    CAPEX_COLUMN,
    CHANGE_IN_NWC_COLUMN,
    FCF_COLUMN,
    DISCOUNTED_FCF_COLUMN,
];

/// Writes a single workbook file
#[derive(Debug, Clone)]
pub struct XlsxReportSink {
    pub path: PathBuf,
}

impl XlsxReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for XlsxReportSink {
    fn write(&self, result: &ValuationResult) -> DcfResult<PathBuf> {
        let money = Format::new().set_num_format("#,##0.00");
        let mut workbook = Workbook::new();

        write_projections(workbook.add_worksheet(), &result.projections, &money)?;
        write_summary(workbook.add_worksheet(), result, &money)?;

        workbook.save(&self.path)?;
        log::info!("Wrote XLSX report to {}", self.path.display());
        Ok(self.path.clone())
    }
}

fn write_projections(
    sheet: &mut Worksheet,
    periods: &[ProjectionPeriod],
    money: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(DETAILED_PROJECTIONS_WORKSHEET)?;
    for (col, header) in PROJECTION_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, period) in periods.iter().enumerate() {
        let row = i as u32 + 1;
        // Integer labels stay numeric so the sheet sorts and charts as years
        match period.year_number() {
            Some(year) => sheet.write_number(row, 0, year as f64)?,
            None => sheet.write_string(row, 0, &period.year)?,
        };

        let values = period
            .numeric_fields()
            .into_iter()
            .map(|(_, value)| value)
            .chain(std::iter::once(period.discounted_fcf));
        for (col, value) in values.enumerate() {
            if let Some(value) = value {
                sheet.write_number_with_format(row, col as u16 + 1, value, money)?;
            }
        }
    }
    Ok(())
}

fn write_summary(sheet: &mut Worksheet, result: &ValuationResult, money: &Format) -> Result<(), XlsxError> {
    sheet.set_name(SUMMARY_WORKSHEET)?;
    sheet.write_string(0, 0, "Metric")?;
    sheet.write_string(0, 1, "Value")?;

    for (i, (metric, value)) in result.summary_rows().into_iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, metric)?;
        sheet.write_number_with_format(row, 1, value, money)?;
    }
    Ok(())
}
