//! Source file existence check.

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::config::PathSettings;
use crate::error::{PipelineError, PipelineResult};

/// The two inputs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub orders: PathBuf,
    pub customers: PathBuf,
}

/// Confirms both input files exist for the run date.
///
/// The orders file is checked first.
///
/// ## Errors
/// `PipelineError::SourceFileNotFound` naming the first missing file.
pub fn check_source_files(paths: &PathSettings, run_date: NaiveDate) -> PipelineResult<SourceFiles> {
    let sources = SourceFiles {
        orders: paths.orders_path(run_date),
        customers: paths.customers_path(),
    };

    for path in [&sources.orders, &sources.customers] {
        if !path.is_file() {
            return Err(PipelineError::SourceFileNotFound { path: path.clone() });
        }
    }

    info!(
        orders = %sources.orders.display(),
        customers = %sources.customers.display(),
        "Source files verified"
    );
    Ok(sources)
}
