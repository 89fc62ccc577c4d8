//! # datashop-pipeline: Daily Pipeline for the DataShop Report
//!
//! Wires the file layer and the pure core into the four daily steps and
//! runs them in strict sequence with whole-step retries.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     datashop-pipeline (THIS CRATE)                      │
//! │                                                                         │
//! │   PipelineConfig (defaults ◄ datashop.toml ◄ DATASHOP_* env)           │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   DailyPipeline::run(run_date)                                         │
//! │          │   span pipeline_run { run_id, run_date }                     │
//! │          │                                                              │
//! │          ├─► steps::check_source_files   orders_<date>.csv, customers  │
//! │          ├─► steps::run_quality_checks   datashop-store → core validate│
//! │          ├─► steps::transform            core metrics → ReportWriter   │
//! │          └─► steps::present              summary + simulated load      │
//! │                                                                         │
//! │   Each arrow is wrapped in RetryPolicy::run (fixed delay, N retries).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Paths, retry and validation settings (TOML + env)
//! - [`error`] - Pipeline, transform and config error types
//! - [`steps`] - The four steps, usable on their own
//! - [`runner`] - `DailyPipeline` and `RetryPolicy`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use datashop_pipeline::{DailyPipeline, PipelineConfig};
//!
//! let config = PipelineConfig::load(None)?;
//! let run = DailyPipeline::new(config).run(run_date, &mut std::io::stdout())?;
//! println!("run {} total {}", run.run_id, run.report.total_sales);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod runner;
pub mod steps;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{PathSettings, PipelineConfig, RetrySettings, DEFAULT_CONFIG_FILE};
pub use error::{
    ConfigError, ConfigResult, PipelineError, PipelineResult, TransformError, TransformResult,
};
pub use runner::{DailyPipeline, PipelineRun, RetryPolicy, Step};
pub use steps::{
    check_customers, check_orders, check_source_files, present, render_summary,
    run_quality_checks, transform, QualityReport, SourceFiles,
};
