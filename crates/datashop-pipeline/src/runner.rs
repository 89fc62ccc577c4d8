//! # Daily Pipeline Runner
//!
//! Runs the four steps in order for one run date.
//!
//! ## Run Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  span pipeline_run { run_id = <uuid v4>, run_date = 2024-01-01 }        │
//! │                                                                         │
//! │   check_source_files ──ok──► run_quality_checks ──ok──► transform_data  │
//! │          │                          │                        │          │
//! │         err                        err                      ok          │
//! │          ▼                          ▼                        ▼          │
//! │   ┌──────────────┐          ┌──────────────┐          load_results      │
//! │   │ retry after  │          │ retry after  │                            │
//! │   │ fixed delay, │          │ fixed delay, │   (every step retries the  │
//! │   │ then fail    │          │ then fail    │    same way)               │
//! │   └──────────────┘          └──────────────┘                            │
//! │                                                                         │
//! │  A failed step ends the run; later steps never start.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use backoff::backoff::{Backoff, Constant};
use chrono::NaiveDate;
use std::fmt;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use datashop_core::DailyReport;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::steps::{check_source_files, present, run_quality_checks, transform};

// =============================================================================
// Steps
// =============================================================================

/// A pipeline step, as named in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CheckSourceFiles,
    QualityChecks,
    Transform,
    Load,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::CheckSourceFiles => write!(f, "check_source_files"),
            Step::QualityChecks => write!(f, "run_quality_checks"),
            Step::Transform => write!(f, "transform_data"),
            Step::Load => write!(f, "load_results"),
        }
    }
}

// =============================================================================
// Retry Policy
// =============================================================================

/// Whole-step retries with a fixed delay.
///
/// A step runs at most `max_retries + 1` times. Every error kind is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        RetryPolicy { max_retries, delay }
    }

    /// Single attempt, no waiting.
    pub fn none() -> Self {
        RetryPolicy::new(0, Duration::ZERO)
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `op` until it succeeds or the retries are used up.
    ///
    /// Returns the last error on exhaustion.
    pub fn run<T, F>(&self, step: Step, mut op: F) -> PipelineResult<T>
    where
        F: FnMut() -> PipelineResult<T>,
    {
        let mut backoff = Constant::new(self.delay);
        let mut attempt = 1u32;

        loop {
            debug!(step = %step, attempt, "Running step");

            let err = match op() {
                Ok(value) => {
                    if attempt > 1 {
                        info!(step = %step, attempt, "Step succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if attempt > self.max_retries {
                error!(step = %step, attempts = attempt, kind = err.kind(), error = %err, "Step failed");
                return Err(err);
            }

            warn!(step = %step, attempt, error = %err, "Step failed, will retry");

            let duration = backoff.next_backoff().unwrap_or(self.delay);
            debug!(?duration, step = %step, "Waiting before retry");
            std::thread::sleep(duration);

            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(1, Duration::from_secs(300))
    }
}

// =============================================================================
// Daily Pipeline
// =============================================================================

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub run_date: NaiveDate,
    pub report: DailyReport,
}

/// The daily pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct DailyPipeline {
    config: PipelineConfig,
    retry: RetryPolicy,
}

impl DailyPipeline {
    /// Creates a pipeline retrying as configured.
    pub fn new(config: PipelineConfig) -> Self {
        let retry = config.retry_policy();
        DailyPipeline { config, retry }
    }

    /// Replaces the configured retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every step for `run_date`, writing the summary to `out`.
    ///
    /// ## Errors
    /// The error of the first step that failed after its retries.
    pub fn run<W: Write>(&self, run_date: NaiveDate, out: &mut W) -> PipelineResult<PipelineRun> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", run_id = %run_id, run_date = %run_date);
        let _guard = span.enter();

        info!("Pipeline run started");

        let sources = self.retry.run(Step::CheckSourceFiles, || {
            check_source_files(&self.config.paths, run_date)
        })?;

        let quality = self.retry.run(Step::QualityChecks, || {
            run_quality_checks(&sources.orders, &sources.customers, &self.config.validation)
        })?;
        debug!(
            orders = quality.orders.rows,
            customers = quality.customers.rows,
            "Quality checks passed"
        );

        let report = self.retry.run(Step::Transform, || {
            transform(
                &sources.orders,
                &sources.customers,
                self.config.output_dir(),
                run_date,
            )
            .map_err(PipelineError::from)
        })?;

        self.retry.run(Step::Load, || present(&report, &mut *out))?;

        info!("Pipeline run finished");
        Ok(PipelineRun {
            run_id,
            run_date,
            report,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
