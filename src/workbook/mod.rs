//! Workbook input: the assumption sheet plus the projection sheet
//!
//! Three layouts are accepted:
//! - a spreadsheet (`.xlsx`, `.xlsm`, `.xls`, `.ods`) with `Assumptions` and
//!   `Projections` sheets
//! - a directory holding `Assumptions.csv` and `Projections.csv`
//! - a `.json` file with `assumptions` and `projections` members

mod xlsx;

pub use xlsx::{is_spreadsheet, load_spreadsheet, SPREADSHEET_EXTENSIONS};

use crate::assumptions::{load_assumption_sheet, AssumptionSheet, Assumptions};
use crate::error::{DcfError, DcfResult};
use crate::projection::{load_projection_sheet, periods_from_json_rows, ProjectionPeriod};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

pub const ASSUMPTIONS_SHEET: &str = "Assumptions.csv";
pub const PROJECTIONS_SHEET: &str = "Projections.csv";

/// Raw contents of an input workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub assumption_sheet: AssumptionSheet,
    pub projections: Vec<ProjectionPeriod>,
}

#[derive(Debug, Deserialize)]
struct JsonWorkbook {
    #[serde(default)]
    assumptions: Map<String, Value>,
    projections: Option<Vec<Map<String, Value>>>,
}

impl Workbook {
    /// Load a workbook from a spreadsheet, a sheet directory or a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> DcfResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DcfError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        if path.is_dir() {
            Self::load_sheet_dir(path)
        } else if is_spreadsheet(path) {
            load_spreadsheet(path)
        } else if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let text = std::fs::read_to_string(path).map_err(|e| DcfError::io(path, e))?;
            Self::from_json_str(&text)
        } else {
            Err(DcfError::InvalidInput(format!(
                "{} is not a spreadsheet, a sheet directory or a .json workbook",
                path.display()
            )))
        }
    }

    fn load_sheet_dir(dir: &Path) -> DcfResult<Self> {
        let sheet = |name: &str| {
            let sheet_path = dir.join(name);
            if sheet_path.is_file() {
                Ok(sheet_path)
            } else {
                Err(DcfError::InvalidInput(format!(
                    "workbook {} has no {} sheet",
                    dir.display(),
                    name
                )))
            }
        };

        Ok(Self {
            assumption_sheet: load_assumption_sheet(sheet(ASSUMPTIONS_SHEET)?)?,
            projections: load_projection_sheet(sheet(PROJECTIONS_SHEET)?)?,
        })
    }

    /// Parse a JSON workbook
    pub fn from_json_str(text: &str) -> DcfResult<Self> {
        let raw: JsonWorkbook = serde_json::from_str(text)
            .map_err(|e| DcfError::InvalidInput(format!("JSON workbook is malformed: {}", e)))?;
        let projections = raw.projections.ok_or_else(|| {
            DcfError::InvalidInput("JSON workbook has no projections sheet".to_string())
        })?;

        let mut assumption_sheet = AssumptionSheet::default();
        for (param, value) in raw.assumptions {
            let number = match &value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }
            .ok_or_else(|| DcfError::non_numeric("Assumptions", &param, &value.to_string()))?;
            assumption_sheet.entries.push((param, number));
        }

        Ok(Self {
            assumption_sheet,
            projections: periods_from_json_rows(&projections)?,
        })
    }

    /// Typed assumptions with defaults applied
    pub fn assumptions(&self) -> Assumptions {
        self.assumption_sheet.to_assumptions()
    }
}
