//! Load projection periods from the `Projections` sheet

use super::period::*;
use crate::error::{DcfError, DcfResult};
use csv::Reader;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::Path;

/// Sheet name in spreadsheet workbooks
pub const SHEET_NAME: &str = "Projections";

/// Columns needed to derive FCF when the sheet has no FCF column
const DERIVATION_COLUMNS: [&str; 4] = [
    EBITDA_COLUMN,
    DEPRECIATION_COLUMN,
    CAPEX_COLUMN,
    CHANGE_IN_NWC_COLUMN,
];

/// Parse a single numeric cell. Blank cells are absent values.
fn parse_cell(row: usize, column: &str, raw: Option<&str>) -> DcfResult<Option<f64>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| DcfError::non_numeric(&format!("{} row {}", SHEET_NAME, row + 1), column, raw))
}

/// Build a period from a row; `cell` looks up the raw text of a column
fn period_from_cells<F>(row: usize, cell: F) -> DcfResult<ProjectionPeriod>
where
    F: Fn(&str) -> Option<String>,
{
    let year = cell(YEAR_COLUMN)
        .map(|y| y.trim().to_string())
        .filter(|y| !y.is_empty())
        .ok_or_else(|| DcfError::missing_field(row, YEAR_COLUMN))?;

    let number = |column: &str| parse_cell(row, column, cell(column).as_deref());

    Ok(ProjectionPeriod {
        year,
        revenue: number(REVENUE_COLUMN)?,
        ebitda: number(EBITDA_COLUMN)?,
        depreciation: number(DEPRECIATION_COLUMN)?,
        capex: number(CAPEX_COLUMN)?,
        change_in_nwc: number(CHANGE_IN_NWC_COLUMN)?,
        fcf: number(FCF_COLUMN)?,
        discounted_fcf: None,
    })
}

/// Load all projection periods from a CSV file
pub fn load_projection_sheet<P: AsRef<Path>>(path: P) -> DcfResult<Vec<ProjectionPeriod>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DcfError::io(path, e))?;
    load_projection_sheet_from_reader(file)
}

/// Load projection periods from any reader (e.g., string buffer)
pub fn load_projection_sheet_from_reader<R: std::io::Read>(
    reader: R,
) -> DcfResult<Vec<ProjectionPeriod>> {
    let mut reader = Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DcfError::malformed_sheet(SHEET_NAME, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let rows = reader.records().map(|result| {
        result
            .map(|record| record.iter().map(str::to_string).collect::<Vec<String>>())
            .map_err(|e| DcfError::malformed_sheet(SHEET_NAME, e))
    });
    periods_from_table(&headers, rows)
}

/// Build periods from a header row and text rows
///
/// Shared by every workbook format; each row is a list of cell texts.
pub fn periods_from_table<I>(headers: &[String], rows: I) -> DcfResult<Vec<ProjectionPeriod>>
where
    I: IntoIterator<Item = DcfResult<Vec<String>>>,
{
    let headers: Vec<&str> = headers.iter().map(|h| h.trim()).collect();

    let has_column = |name: &str| headers.iter().any(|h| *h == name);
    let mut required = vec![YEAR_COLUMN];
    if !has_column(FCF_COLUMN) {
        required.extend(DERIVATION_COLUMNS);
    }
    if let Some(missing) = required.iter().find(|c| !has_column(**c)) {
        return Err(DcfError::InvalidInput(format!(
            "{} sheet is missing column '{}'",
            SHEET_NAME, missing
        )));
    }

    let mut periods = Vec::new();
    for (row, cells) in rows.into_iter().enumerate() {
        let cells = cells?;
        let period = period_from_cells(row, |column| {
            headers
                .iter()
                .position(|h| *h == column)
                .and_then(|idx| cells.get(idx))
                .cloned()
        })?;
        periods.push(period);
    }

    log::debug!("Loaded {} projection periods", periods.len());
    Ok(periods)
}

/// Convert JSON projection rows (objects keyed by column name) into periods
pub fn periods_from_json_rows(rows: &[Map<String, Value>]) -> DcfResult<Vec<ProjectionPeriod>> {
    rows.iter()
        .enumerate()
        .map(|(row, object)| {
            for (column, value) in object {
                if matches!(value, Value::Bool(_) | Value::Array(_) | Value::Object(_)) {
                    return Err(DcfError::non_numeric(
                        &format!("{} row {}", SHEET_NAME, row + 1),
                        column,
                        &value.to_string(),
                    ));
                }
            }
            period_from_cells(row, |column| match object.get(column)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
        })
        .collect()
}
