//! CLI entry point for the marksheet tool.
//!
//! Prompts for unit codes and marks on stdin and prints an end-of-semester
//! results sheet, optionally logging a summary row to CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use marksheet::{
    config::ReportConfig,
    input::collect_entries,
    output::{ResultRecord, append_record, render_bands, render_json, render_text},
    report::build_sheet,
};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "marksheet")]
#[command(about = "Prints an end-of-semester results sheet from entered marks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Read unit codes and marks from stdin and print the results sheet
    Report {
        /// JSON file with the student identity and subject names
        /// (falls back to $MARKSHEET_CONFIG, then the built-in sheet)
        #[arg(short, long, value_name = "FILE")]
        config: Option<String>,

        /// Output format for the sheet
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// CSV file to append a summary row to
        #[arg(short, long, value_name = "FILE")]
        record: Option<String>,
    },
    /// Print the grading criteria
    Bands,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/marksheet.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("marksheet.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries prompts and the sheet, so stderr stays quiet by default
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            config,
            format,
            record,
        } => {
            let config_path = config.or_else(|| std::env::var("MARKSHEET_CONFIG").ok());
            report(config_path.as_deref(), format, record.as_deref())?;
        }
        Commands::Bands => {
            let mut out = io::stdout().lock();
            writeln!(out, "Grading Criteria")?;
            render_bands(&mut out)?;
        }
    }

    Ok(())
}

/// Collects marks from stdin, builds the sheet and prints it in `format`.
///
/// Nothing is printed beyond the prompts unless every mark parses and the
/// unit count matches the configured subjects.
#[tracing::instrument(skip(format))]
fn report(config_path: Option<&str>, format: Format, record: Option<&str>) -> Result<()> {
    let config = ReportConfig::load_or_default(config_path)?;
    info!(
        student = %config.student.name,
        subjects = config.subjects.len(),
        "Config loaded"
    );

    let entries = collect_entries(io::stdin().lock(), io::stdout(), config.subjects.len())
        .context("failed to read unit marks")?;
    let sheet = build_sheet(&config, &entries).context("cannot build results sheet")?;

    let mut rendered = Vec::new();
    match format {
        Format::Text => render_text(&mut rendered, &sheet)?,
        Format::Json => writeln!(rendered, "{}", render_json(&sheet)?)?,
    }
    io::stdout().lock().write_all(&rendered)?;

    if let Some(path) = record {
        append_record(path, &ResultRecord::from_sheet(&sheet))
            .with_context(|| format!("failed to append record to '{path}'"))?;
    }

    info!(
        total = sheet.summary.total,
        average = sheet.summary.average,
        grade = %sheet.summary.grade,
        "Results sheet printed"
    );
    Ok(())
}
