//! # Error Types
//!
//! Domain-specific error types for datashop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  datashop-core errors (this file)                                      │
//! │  ├── ValidationError  - Quality check failures (fatal to the run)      │
//! │  └── CoreError        - Table shape problems during aggregation        │
//! │                                                                         │
//! │  datashop-store errors (separate crate)                                │
//! │  └── StoreError       - File read/write failures                       │
//! │                                                                         │
//! │  datashop-pipeline errors (separate crate)                             │
//! │  └── PipelineError    - What a failed run reports                      │
//! │                                                                         │
//! │  Flow: ValidationError → PipelineError::Validation                     │
//! │        CoreError/StoreError → TransformError → PipelineError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (table, column, row, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Quality check failures.
///
/// Row numbers are 1-based positions among the data rows (the header row is
/// not counted).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more required columns are absent.
    ///
    /// ## When This Occurs
    /// - Upstream export dropped a column
    /// - Wrong file passed (e.g. customers file as orders)
    /// - Empty file with no header row
    #[error("{table}: missing columns {columns:?}")]
    MissingColumns { table: String, columns: Vec<String> },

    /// A column that must always be filled has a null cell.
    #[error("{table}: null value in {column} (row {row})")]
    NullConstraintViolation {
        table: String,
        column: String,
        row: usize,
    },

    /// A numeric value is outside its allowed range.
    ///
    /// ## When This Occurs
    /// - quantity ≤ 0
    /// - unit_price < 0
    #[error("{table}: {column} must be {constraint}, found {value} (row {row})")]
    RangeViolation {
        table: String,
        column: String,
        constraint: String,
        value: String,
        row: usize,
    },

    /// A column that identifies rows repeats a value.
    #[error("{table}: duplicate {column} '{value}' (row {row})")]
    UniquenessViolation {
        table: String,
        column: String,
        value: String,
        row: usize,
    },

    /// A numeric column holds text that does not parse as a number.
    ///
    /// Only raised when strict numeric checking is enabled; otherwise the
    /// aggregation coerces such cells to zero.
    #[error("{table}: {column} is not numeric, found '{value}' (row {row})")]
    NonNumericValue {
        table: String,
        column: String,
        value: String,
        row: usize,
    },
}

impl ValidationError {
    /// Short machine-readable label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingColumns { .. } => "MISSING_COLUMNS",
            ValidationError::NullConstraintViolation { .. } => "NULL_CONSTRAINT_VIOLATION",
            ValidationError::RangeViolation { .. } => "RANGE_VIOLATION",
            ValidationError::UniquenessViolation { .. } => "UNIQUENESS_VIOLATION",
            ValidationError::NonNumericValue { .. } => "NON_NUMERIC_VALUE",
        }
    }

    /// Name of the table that failed.
    pub fn table(&self) -> &str {
        match self {
            ValidationError::MissingColumns { table, .. }
            | ValidationError::NullConstraintViolation { table, .. }
            | ValidationError::RangeViolation { table, .. }
            | ValidationError::UniquenessViolation { table, .. }
            | ValidationError::NonNumericValue { table, .. } => table,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning tables into records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A column lookup failed.
    #[error("{table}: unknown column '{column}'")]
    UnknownColumn { table: String, column: String },

    /// The table does not have the shape the aggregation needs.
    #[error("Unexpected table shape: {0}")]
    Shape(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::RangeViolation {
            table: "orders".to_string(),
            column: "quantity".to_string(),
            constraint: "> 0".to_string(),
            value: "-1".to_string(),
            row: 2,
        };
        assert_eq!(
            err.to_string(),
            "orders: quantity must be > 0, found -1 (row 2)"
        );

        let err = ValidationError::MissingColumns {
            table: "orders".to_string(),
            columns: vec!["quantity".to_string()],
        };
        assert_eq!(err.to_string(), "orders: missing columns [\"quantity\"]");
    }

    #[test]
    fn test_kind_labels() {
        let err = ValidationError::UniquenessViolation {
            table: "orders".to_string(),
            column: "order_id".to_string(),
            value: "7".to_string(),
            row: 3,
        };
        assert_eq!(err.kind(), "UNIQUENESS_VIOLATION");
        assert_eq!(err.table(), "orders");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NullConstraintViolation {
            table: "orders".to_string(),
            column: "order_id".to_string(),
            row: 1,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Shape(_)));
    }
}
