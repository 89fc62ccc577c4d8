//! # CSV Reader
//!
//! Loads an input file into a [`Table`] without interpreting any cell.
//!
//! Rows may be shorter or longer than the header; the validator decides
//! what that means. An empty file yields a table with no columns, so the
//! missing-columns check reports every required column.

use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use datashop_core::Table;

use crate::error::{StoreError, StoreResult};

/// Reads a comma-separated file with a header row.
///
/// `name` labels the table in validation messages.
///
/// ## Errors
/// `StoreError::Read` if the file cannot be opened or is not valid CSV.
pub fn read_table(path: impl AsRef<Path>, name: &str) -> StoreResult<Table> {
    let path = path.as_ref();
    let read_error = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_error)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_error)?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    debug!(
        path = %path.display(),
        table = name,
        columns = headers.len(),
        rows = rows.len(),
        "Read input table"
    );

    Ok(Table::new(name, headers, rows))
}

/// Reads an orders file.
pub fn read_orders(path: impl AsRef<Path>) -> StoreResult<Table> {
    read_table(path, "orders")
}

/// Reads a customers file.
pub fn read_customers(path: impl AsRef<Path>) -> StoreResult<Table> {
    read_table(path, "customers")
}

// =============================================================================
// Unit Tests
// =============================================================================
