//! # datashop
//!
//! Command-line entrypoints for the daily report.
//!
//! ## Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout  ◄── validation status lines, report summary                   │
//! │  stderr  ◄── tracing logs (RUST_LOG or -v/-vv), error messages          │
//! │  exit 0  ◄── success          exit 1 ◄── any failure                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use datashop_core::ValidationOptions;
use datashop_pipeline::{
    check_customers, check_orders, render_summary, transform, DailyPipeline, PipelineConfig,
    PipelineResult,
};

use crate::cli::{Cli, Command, DEFAULT_CUSTOMERS, DEFAULT_ORDERS, DEFAULT_OUTPUT};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Validate { orders, customers } => match validate(&orders, &customers) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Validations failed: {err}");
                ExitCode::FAILURE
            }
        },
        Command::Transform => exit_with(transform_defaults()),
        Command::Run { date, config } => exit_with(run(date, config)),
    }
}

fn exit_with(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes logging to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - overrides everything below
/// - `-vv` - debug
/// - `-v` - info
/// - Default: warn
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Commands
// =============================================================================

fn validate(orders: &Path, customers: &Path) -> PipelineResult<()> {
    let options = ValidationOptions::default();

    let summary = check_orders(orders, &options)?;
    println!("✓ Orders passed all quality checks ({} rows)", summary.rows);

    let summary = check_customers(customers, &options)?;
    println!("✓ Customers passed all quality checks ({} rows)", summary.rows);

    println!("All quality checks passed");
    Ok(())
}

fn transform_defaults() -> anyhow::Result<()> {
    let run_date = Local::now().date_naive();
    debug!(%run_date, "Running standalone transform");

    let report = transform(
        Path::new(DEFAULT_ORDERS),
        Path::new(DEFAULT_CUSTOMERS),
        Path::new(DEFAULT_OUTPUT),
        run_date,
    )
    .context("Transformation failed")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Transformation complete:")?;
    write!(stdout, "{}", render_summary(&report))?;
    Ok(())
}

fn run(date: Option<chrono::NaiveDate>, config: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let config = PipelineConfig::load(config).context("Failed to load configuration")?;
    let run_date = date.unwrap_or_else(|| Local::now().date_naive());

    let pipeline = DailyPipeline::new(config);
    let run = pipeline
        .run(run_date, &mut std::io::stdout().lock())
        .with_context(|| format!("Daily pipeline failed for {run_date}"))?;

    debug!(run_id = %run.run_id, "Run complete");
    Ok(())
}
