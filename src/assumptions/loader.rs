//! Assumption sheet loader
//!
//! Reads the `Assumptions` sheet: two columns, `Parameter` and `Value`.

use super::Assumptions;
use crate::error::{DcfError, DcfResult};
use csv::Reader;
use std::fs::File;
use std::path::Path;

/// Sheet name in spreadsheet workbooks
pub const SHEET_NAME: &str = "Assumptions";

pub const PARAMETER_COLUMN: &str = "Parameter";
pub const VALUE_COLUMN: &str = "Value";

/// Parameter/value rows in the order they appear in the sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssumptionSheet {
    pub entries: Vec<(String, f64)>,
}

impl AssumptionSheet {
    /// Resolve into typed assumptions, applying defaults for missing keys
    pub fn to_assumptions(&self) -> Assumptions {
        Assumptions::from_pairs(self.entries.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load an assumption sheet from a CSV file
pub fn load_assumption_sheet<P: AsRef<Path>>(path: P) -> DcfResult<AssumptionSheet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DcfError::io(path, e))?;
    load_assumption_sheet_from_reader(file)
}

/// Load an assumption sheet from any reader (e.g., string buffer)
pub fn load_assumption_sheet_from_reader<R: std::io::Read>(reader: R) -> DcfResult<AssumptionSheet> {
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
    assumption_sheet_from_table(&headers, rows)
}

/// Build an assumption sheet from a header row and text rows
///
/// Shared by every workbook format; each row is a list of cell texts.
pub fn assumption_sheet_from_table<I>(headers: &[String], rows: I) -> DcfResult<AssumptionSheet>
where
    I: IntoIterator<Item = DcfResult<Vec<String>>>,
{
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| {
                DcfError::InvalidInput(format!("{} sheet is missing column '{}'", SHEET_NAME, name))
            })
    };
    let param_idx = column(PARAMETER_COLUMN)?;
    let value_idx = column(VALUE_COLUMN)?;

    let mut sheet = AssumptionSheet::default();

    for (row, cells) in rows.into_iter().enumerate() {
        let cells = cells?;
        let cell = |idx: usize| cells.get(idx).map(|c| c.trim()).unwrap_or("");

        let param = cell(param_idx);
        if param.is_empty() {
            continue;
        }

        let raw = cell(value_idx);
        let value: f64 = raw.parse().map_err(|_| {
            DcfError::non_numeric(&format!("{} row {}", SHEET_NAME, row + 1), param, raw)
        })?;

        sheet.entries.push((param.to_string(), value));
    }

    log::debug!("Loaded {} assumption rows", sheet.len());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_assumptions_from_reader() {
        let data = "Parameter,Value\n\
                    discount_rate,0.10\n\
                    terminal_growth_rate,0.02\n\
                    net_debt,5000000\n";
        let sheet = load_assumption_sheet_from_reader(data.as_bytes()).unwrap();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.entries[2], ("net_debt".to_string(), 5_000_000.0));

        let assumptions = sheet.to_assumptions();
        assert_eq!(assumptions.resolve(), (0.10, 0.02, 5_000_000.0));
    }

    #[test]
    fn test_blank_parameter_rows_are_skipped() {
        let data = "Parameter,Value\ndiscount_rate,0.09\n,\n";
        let sheet = load_assumption_sheet_from_reader(data.as_bytes()).unwrap();
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_missing_value_column() {
        let data = "Parameter,Amount\ndiscount_rate,0.10\n";
        let err = load_assumption_sheet_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Value"));
    }

    #[test]
    fn test_ragged_row_is_invalid_input() {
        let data = "Parameter,Value\ndiscount_rate,0.1,extra\n";
        let err = load_assumption_sheet_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_table_rows() {
        let headers = vec!["Parameter".to_string(), "Value".to_string()];
        let rows: Vec<DcfResult<Vec<String>>> = vec![Ok(vec!["net_debt".to_string(), "-1500".to_string()])];
        let sheet = assumption_sheet_from_table(&headers, rows).unwrap();
        assert_eq!(sheet.to_assumptions().net_debt, -1500.0);
    }

    #[test]
    fn test_non_numeric_value() {
        let data = "Parameter,Value\ndiscount_rate,ten percent\n";
        let err = load_assumption_sheet_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("ten percent"));
    }
}
