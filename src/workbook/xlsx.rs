//! Spreadsheet workbooks read through calamine
//!
//! The workbook must carry an `Assumptions` sheet and a `Projections` sheet;
//! the first row of each is the header row.

use super::Workbook;
use crate::assumptions::{self, assumption_sheet_from_table};
use crate::error::{DcfError, DcfResult};
use crate::projection::{self, periods_from_table};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

/// Extensions calamine can open
pub const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SPREADSHEET_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Load both sheets from a spreadsheet file
pub fn load_spreadsheet(path: &Path) -> DcfResult<Workbook> {
    let mut book = open_workbook_auto(path).map_err(|e| {
        DcfError::InvalidInput(format!("{} is not a readable workbook: {}", path.display(), e))
    })?;
    let names = book.sheet_names();

    let mut sheet = |name: &str| -> DcfResult<(Vec<String>, Vec<Vec<String>>)> {
        if !names.iter().any(|n| n == name) {
            return Err(DcfError::InvalidInput(format!(
                "workbook {} has no {} sheet",
                path.display(),
                name
            )));
        }
        let range = book.worksheet_range(name).map_err(|e| {
            DcfError::InvalidInput(format!("{} sheet is malformed: {}", name, e))
        })?;
        Ok(table_from_range(&range))
    };

    let (headers, rows) = sheet(assumptions::loader::SHEET_NAME)?;
    let assumption_sheet = assumption_sheet_from_table(&headers, rows.into_iter().map(Ok))?;

    let (headers, rows) = sheet(projection::loader::SHEET_NAME)?;
    let projections = periods_from_table(&headers, rows.into_iter().map(Ok))?;

    log::debug!(
        "Loaded {} assumptions and {} periods from {}",
        assumption_sheet.len(),
        projections.len(),
        path.display()
    );
    Ok(Workbook {
        assumption_sheet,
        projections,
    })
}

/// Split a used range into its header row and the rows below, as cell text
fn table_from_range(range: &Range<Data>) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();
    (headers, rows.collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
