//! Persisted output artifacts

use crate::error::{DcfError, DcfResult};
use crate::valuation::ValuationResult;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const DETAILED_PROJECTIONS_SHEET: &str = "Detailed_Projections.csv";
pub const SUMMARY_SHEET: &str = "Summary.csv";

/// Destination for a finished valuation
pub trait ReportSink {
    /// Persist the result; returns the path written
    fn write(&self, result: &ValuationResult) -> DcfResult<PathBuf>;
}

/// Writes a directory with one CSV file per table
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    pub dir: PathBuf,
}

impl CsvReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write_projections(&self, path: &Path, result: &ValuationResult) -> DcfResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for period in &result.projections {
            writer.serialize(period)?;
        }
        writer.flush().map_err(|e| DcfError::io(path, e))
    }

    fn write_summary(&self, path: &Path, result: &ValuationResult) -> DcfResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["Metric", "Value"])?;
        for (metric, value) in result.summary_rows() {
            writer.write_record([metric.to_string(), value.to_string()])?;
        }
        writer.flush().map_err(|e| DcfError::io(path, e))
    }
}

impl ReportSink for CsvReportSink {
    fn write(&self, result: &ValuationResult) -> DcfResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| DcfError::io(&self.dir, e))?;

        self.write_projections(&self.dir.join(DETAILED_PROJECTIONS_SHEET), result)?;
        self.write_summary(&self.dir.join(SUMMARY_SHEET), result)?;

        log::info!("Wrote CSV report to {}", self.dir.display());
        Ok(self.dir.clone())
    }
}

/// Writes the full result as a single JSON document
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    pub path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for JsonReportSink {
    fn write(&self, result: &ValuationResult) -> DcfResult<PathBuf> {
        let file = File::create(&self.path).map_err(|e| DcfError::io(&self.path, e))?;
        serde_json::to_writer_pretty(file, result)?;

        log::info!("Wrote JSON report to {}", self.path.display());
        Ok(self.path.clone())
    }
}
