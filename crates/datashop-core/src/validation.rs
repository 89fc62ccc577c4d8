//! # Validation Module
//!
//! Quality checks for the orders and customers tables.
//!
//! ## Check Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Orders Quality Checks                              │
//! │                                                                         │
//! │  1. Columns   order_id, customer_id, product_id, quantity,             │
//! │               unit_price, order_date present?  ── MissingColumns        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. Nulls     order_id, customer_id filled?  ─── NullConstraintViolation│
//! │           │                                                             │
//! │           ▼                                                             │
//! │  3. Ranges    quantity > 0, unit_price >= 0? ─── RangeViolation         │
//! │           │   (strict: numeric at all?)     ─── NonNumericValue         │
//! │           ▼                                                             │
//! │  4. Unique    order_id never repeats?       ─── UniquenessViolation     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ValidationSummary                                                      │
//! │                                                                         │
//! │  The first failing check returns. Later checks never run.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use datashop_core::{validate_orders, Table, ValidationError, ValidationOptions};
//!
//! let orders = Table::new(
//!     "orders",
//!     vec!["order_id", "customer_id"],
//!     vec![vec!["1", "101"]],
//! );
//!
//! let err = validate_orders(&orders, &ValidationOptions::default()).unwrap_err();
//! assert!(matches!(err, ValidationError::MissingColumns { .. }));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::table::{cell_at, is_null_cell, parse_numeric, Table};
use crate::types::Key;
use crate::{CUSTOMER_COLUMNS, ORDER_COLUMNS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Options and Outcome
// =============================================================================

/// Optional stricter checks.
///
/// Both default to off, which keeps non-numeric quantities/prices flowing
/// into the aggregation (coerced to zero) and accepts repeated customer ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Reject non-numeric quantity/unit_price cells.
    #[serde(default)]
    pub strict_numeric: bool,

    /// Reject repeated customer_id values in the customers table.
    #[serde(default)]
    pub unique_customers: bool,
}

/// Pass confirmation for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub table: String,
    pub rows: usize,
}

/// Numeric range a column must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    /// value > 0
    Positive,
    /// value >= 0
    NonNegative,
}

impl Bound {
    fn allows(self, value: f64) -> bool {
        match self {
            Bound::Positive => value > 0.0,
            Bound::NonNegative => value >= 0.0,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Bound::Positive => "> 0",
            Bound::NonNegative => ">= 0",
        }
    }
}

// =============================================================================
// Table Validators
// =============================================================================

/// Validates the orders table.
///
/// ## Rules
/// - All of `ORDER_COLUMNS` present
/// - `order_id`, then `customer_id`, never null
/// - every numeric `quantity` > 0, then every numeric `unit_price` >= 0
/// - `order_id` unique
pub fn validate_orders(
    table: &Table,
    options: &ValidationOptions,
) -> ValidationResult<ValidationSummary> {
    require_columns(table, &ORDER_COLUMNS)?;

    require_non_null(table, "order_id")?;
    require_non_null(table, "customer_id")?;

    require_range(table, "quantity", Bound::Positive, options.strict_numeric)?;
    require_range(table, "unit_price", Bound::NonNegative, options.strict_numeric)?;

    require_unique(table, "order_id")?;

    Ok(summary(table))
}

/// Validates the customers table.
///
/// ## Rules
/// - All of `CUSTOMER_COLUMNS` present
/// - `customer_id` never null
/// - `customer_id` unique, only with `unique_customers`
pub fn validate_customers(
    table: &Table,
    options: &ValidationOptions,
) -> ValidationResult<ValidationSummary> {
    require_columns(table, &CUSTOMER_COLUMNS)?;

    require_non_null(table, "customer_id")?;

    if options.unique_customers {
        require_unique(table, "customer_id")?;
    }

    Ok(summary(table))
}

fn summary(table: &Table) -> ValidationSummary {
    ValidationSummary {
        table: table.name().to_string(),
        rows: table.len(),
    }
}

// =============================================================================
// Individual Checks
// =============================================================================

/// Fails with every required column the table lacks, in the given order.
pub fn require_columns(table: &Table, required: &[&str]) -> ValidationResult<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingColumns {
            table: table.name().to_string(),
            columns: missing,
        })
    }
}

/// Fails on the first null cell of `column`.
pub fn require_non_null(table: &Table, column: &str) -> ValidationResult<()> {
    let index = checked_index(table, column)?;

    match table.rows().position(|row| is_null_cell(cell_at(row, index))) {
        Some(position) => Err(ValidationError::NullConstraintViolation {
            table: table.name().to_string(),
            column: column.to_string(),
            row: position + 1,
        }),
        None => Ok(()),
    }
}

/// Fails on the first numeric cell of `column` outside `bound`.
///
/// Null cells always pass. Non-numeric cells pass unless `strict`.
fn require_range(table: &Table, column: &str, bound: Bound, strict: bool) -> ValidationResult<()> {
    let index = checked_index(table, column)?;

    for (position, row) in table.rows().enumerate() {
        let cell = cell_at(row, index);
        if is_null_cell(cell) {
            continue;
        }

        match parse_numeric(cell) {
            Some(value) if !bound.allows(value) => {
                return Err(ValidationError::RangeViolation {
                    table: table.name().to_string(),
                    column: column.to_string(),
                    constraint: bound.describe().to_string(),
                    value: cell.trim().to_string(),
                    row: position + 1,
                });
            }
            Some(_) => {}
            None if strict => {
                return Err(ValidationError::NonNumericValue {
                    table: table.name().to_string(),
                    column: column.to_string(),
                    value: cell.trim().to_string(),
                    row: position + 1,
                });
            }
            None => {}
        }
    }

    Ok(())
}

/// Fails on the first repeated value of `column`.
///
/// Values compare as [`Key`]s, so `7` and `07` are the same id.
pub fn require_unique(table: &Table, column: &str) -> ValidationResult<()> {
    let index = checked_index(table, column)?;
    let mut seen = HashSet::with_capacity(table.len());

    for (position, row) in table.rows().enumerate() {
        let value = cell_at(row, index).trim();
        if !seen.insert(Key::new(value)) {
            return Err(ValidationError::UniquenessViolation {
                table: table.name().to_string(),
                column: column.to_string(),
                value: value.to_string(),
                row: position + 1,
            });
        }
    }

    Ok(())
}

fn checked_index(table: &Table, column: &str) -> ValidationResult<usize> {
    table
        .column_index(column)
        .map_err(|_| ValidationError::MissingColumns {
            table: table.name().to_string(),
            columns: vec![column.to_string()],
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
