//! CLI entry point for the air-quality report tool.
//!
//! Provides subcommands for rendering the full chart report page and for
//! dumping the computed summary tables as JSON.

use air_quality_report::dataset::load_records;
use air_quality_report::report::render_report;
use air_quality_report::summaries::{ReportOptions, build_tables};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "air_quality_report")]
#[command(about = "A tool to summarize and chart air-quality measurements", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all four summaries and render the report page
    Report {
        /// Path to the measurement CSV
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// SVG file to render the report page to
        #[arg(short, long, default_value = "report.svg")]
        output: PathBuf,

        #[command(flatten)]
        params: SummaryParams,
    },
    /// Compute the four summary tables and log them as JSON
    Summarize {
        /// Path to the measurement CSV
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        params: SummaryParams,
    },
}

#[derive(Args)]
struct SummaryParams {
    /// Year the monthly-delta and station summaries report on
    #[arg(long, default_value_t = 2016)]
    focus_year: i32,

    /// Only consider measurements on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from_date: Option<NaiveDate>,

    /// Only consider measurements on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to_date: Option<NaiveDate>,
}

impl SummaryParams {
    fn to_options(&self) -> ReportOptions {
        ReportOptions {
            focus_year: self.focus_year,
            from_date: self.from_date,
            to_date: self.to_date,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/air_quality_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("air_quality_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            output,
            params,
        } => {
            let records = load_records(&input)?;
            info!(records = records.len(), input = %input.display(), "Dataset loaded");

            let opts = params.to_options();
            let tables = build_tables(&records, &opts);
            info!(
                years = tables.yearly_pm25.len(),
                monthly_deltas = tables.monthly_co_deltas.len(),
                stations = tables.station_means.len(),
                daily_points = tables.daily_pm25.len(),
                "Summary tables computed"
            );

            render_report(&output, &tables, &opts)?;
        }
        Commands::Summarize { input, params } => {
            let records = load_records(&input)?;
            info!(records = records.len(), input = %input.display(), "Dataset loaded");

            let tables = build_tables(&records, &params.to_options());
            info!("{}", serde_json::to_string_pretty(&tables)?);
        }
    }

    Ok(())
}
