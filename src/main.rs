//! DCF Valuation CLI
//!
//! Loads a workbook, runs the valuation and writes the output artifact

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use dcf_valuation::report::{
    render_assumptions, render_preview, render_summary, CsvReportSink, JsonReportSink, ReportSink,
    XlsxReportSink,
};
use dcf_valuation::valuation::{ValuationConfig, ValuationEngine, YearCheck};
use dcf_valuation::Workbook;
use std::path::{Path, PathBuf};

/// Automated DCF valuation
#[derive(Parser, Debug)]
#[command(name = "dcf", version, about, long_about = None)]
struct Cli {
    /// Workbook: an .xlsx file, a directory with Assumptions.csv and
    /// Projections.csv, or a .json file
    input: PathBuf,

    /// Output path (default: dcf_output.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output artifact format (default: from the output extension, else xlsx)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Number of projection rows to preview
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,

    /// Do not require integer Year labels to be contiguous
    #[arg(long)]
    no_year_check: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// Format implied by an output path; extensionless paths are CSV directories
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => OutputFormat::Xlsx,
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }

    fn default_output(self) -> PathBuf {
        match self {
            OutputFormat::Xlsx => PathBuf::from("dcf_output.xlsx"),
            OutputFormat::Csv => PathBuf::from("dcf_output"),
            OutputFormat::Json => PathBuf::from("dcf_output.json"),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input.exists() {
        bail!("File {} does not exist.", cli.input.display());
    }

    let workbook = Workbook::load(&cli.input)
        .with_context(|| format!("failed to load workbook {}", cli.input.display()))?;

    println!("{}", render_assumptions(&workbook.assumption_sheet));
    println!("{}", render_preview(&workbook.projections, cli.preview_rows));

    let config = ValuationConfig {
        year_check: if cli.no_year_check { YearCheck::Off } else { YearCheck::Contiguous },
    };
    let engine = ValuationEngine::new(workbook.assumptions(), config);
    let result = engine
        .value(&workbook.projections)
        .context("valuation failed")?;

    println!("{}", render_summary(&result));

    let (format, output) = match (cli.format, cli.output.clone()) {
        (Some(format), Some(output)) => (format, output),
        (Some(format), None) => (format, format.default_output()),
        (None, Some(output)) => (OutputFormat::from_path(&output), output),
        (None, None) => (OutputFormat::Xlsx, OutputFormat::Xlsx.default_output()),
    };
    let sink: Box<dyn ReportSink> = match format {
        OutputFormat::Xlsx => Box::new(XlsxReportSink::new(output)),
        OutputFormat::Csv => Box::new(CsvReportSink::new(output)),
        OutputFormat::Json => Box::new(JsonReportSink::new(output)),
    };
    let written = sink.write(&result).context("failed to write output")?;

    println!("Detailed output saved to {}", written.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
