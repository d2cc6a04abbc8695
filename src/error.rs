//! Error types for valuation runs
//!
//! The engine fails fast with a named condition; callers decide how to
//! present it.

use thiserror::Error;

/// Result alias used throughout the crate
pub type DcfResult<T> = Result<T, DcfError>;

/// Errors raised while loading, valuing, or writing a DCF workbook
#[derive(Error, Debug)]
pub enum DcfError {
    /// Missing field, empty projections, non-numeric value, or malformed source
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Assumptions that make the valuation undefined (e.g. r == g)
    #[error("invalid assumption: {0}")]
    InvalidAssumption(String),

    /// File system failure at the input or output boundary
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl DcfError {
    pub fn empty_projections() -> Self {
        DcfError::InvalidInput("projections contain no periods".to_string())
    }

    /// A field needed for FCF derivation is absent on a period (0-based index)
    pub fn missing_field(period: usize, field: &str) -> Self {
        DcfError::InvalidInput(format!("period {} is missing required field '{}'", period, field))
    }

    /// A cell could not be read as a number
    pub fn non_numeric(location: &str, field: &str, raw: &str) -> Self {
        DcfError::InvalidInput(format!(
            "{}: field '{}' has non-numeric value '{}'",
            location, field, raw
        ))
    }

    /// A sheet that could not be read as a table. File system failures stay
    /// `Csv`; anything else about the content is `InvalidInput`.
    pub fn malformed_sheet(sheet: &str, err: csv::Error) -> Self {
        if err.is_io_error() {
            return DcfError::Csv(err);
        }
        DcfError::InvalidInput(format!("{} sheet is malformed: {}", sheet, err))
    }

    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        DcfError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DcfError::InvalidInput(_))
    }

    pub fn is_invalid_assumption(&self) -> bool {
        matches!(self, DcfError::InvalidAssumption(_))
    }
}
