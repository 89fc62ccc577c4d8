//! # Quality Checks Step
//!
//! Reads both inputs and runs the table validators.
//!
//! ```text
//! read orders ──► validate_orders ──► read customers ──► validate_customers
//!      │                │                   │                   │
//!      ▼                ▼                   ▼                   ▼
//!   Input(err)     Validation(err)       Input(err)        Validation(err)
//! ```
//!
//! The first failure ends the step. Nothing is written.

use std::path::Path;
use tracing::{error, info};

use datashop_core::{validate_customers, validate_orders, ValidationOptions, ValidationSummary};
use datashop_store::{read_customers, read_orders};

use crate::error::PipelineResult;

/// Both tables passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityReport {
    pub orders: ValidationSummary,
    pub customers: ValidationSummary,
}

/// Validates the orders file, then the customers file.
///
/// ## Errors
/// - `PipelineError::Input` if a file cannot be read as CSV
/// - `PipelineError::Validation` on the first failed check
pub fn run_quality_checks(
    orders_path: &Path,
    customers_path: &Path,
    options: &ValidationOptions,
) -> PipelineResult<QualityReport> {
    let orders = check_orders(orders_path, options)?;
    let customers = check_customers(customers_path, options)?;
    Ok(QualityReport { orders, customers })
}

/// Reads and validates the orders file alone.
pub fn check_orders(path: &Path, options: &ValidationOptions) -> PipelineResult<ValidationSummary> {
    let orders = read_orders(path)?;
    let summary = validate_orders(&orders, options).map_err(|err| {
        error!(kind = err.kind(), error = %err, "Orders quality checks failed");
        err
    })?;
    info!(rows = summary.rows, "Orders quality checks passed");
    Ok(summary)
}

/// Reads and validates the customers file alone.
pub fn check_customers(
    path: &Path,
    options: &ValidationOptions,
) -> PipelineResult<ValidationSummary> {
    let customers = read_customers(path)?;
    let summary = validate_customers(&customers, options).map_err(|err| {
        error!(kind = err.kind(), error = %err, "Customers quality checks failed");
        err
    })?;
    info!(rows = summary.rows, "Customers quality checks passed");
    Ok(summary)
}
