//! # datashop-core: Pure Logic for the DataShop Daily Report
//!
//! This crate is the **heart** of the daily report. It contains the quality
//! checks and the sales aggregation as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DataShop Daily Pipeline                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 datashop-pipeline / datashop CLI                │   │
//! │  │    check sources ──► quality checks ──► transform ──► present   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ datashop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   table   │  │validation │  │  metrics  │  │   money   │  │   │
//! │  │   │  Table    │  │ orders    │  │ totals    │  │  Money    │  │   │
//! │  │   │  cells    │  │ customers │  │ top 5     │  │  cents    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                datashop-store (File Layer)                      │   │
//! │  │        CSV tables in, daily_report_*.json + top_products_*.csv  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`table`] - Raw row set read from a CSV file
//! - [`types`] - Order/customer records and the daily report
//! - [`money`] - Money type with integer cents
//! - [`error`] - Validation and core error types
//! - [`validation`] - Quality checks for the orders and customers tables
//! - [`metrics`] - The daily aggregation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datashop_core::{compute_daily_report, validate_orders, Table, ValidationOptions};
//!
//! let orders = Table::new(
//!     "orders",
//!     vec!["order_id", "customer_id", "product_id", "quantity", "unit_price", "order_date"],
//!     vec![vec!["1", "101", "1", "2", "10.0", "2024-01-01"]],
//! );
//! let customers = Table::new(
//!     "customers",
//!     vec!["customer_id", "customer_name", "email"],
//!     vec![vec!["101", "Ana", "ana@email.com"]],
//! );
//!
//! validate_orders(&orders, &ValidationOptions::default()).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let report = compute_daily_report(&orders, &customers, date).unwrap();
//! assert_eq!(report.total_sales.cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod metrics;
pub mod money;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use metrics::compute_daily_report;
pub use money::Money;
pub use table::Table;
pub use types::*;
pub use validation::{
    validate_customers, validate_orders, ValidationOptions, ValidationResult, ValidationSummary,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Columns every orders file must carry.
pub const ORDER_COLUMNS: [&str; 6] = [
    "order_id",
    "customer_id",
    "product_id",
    "quantity",
    "unit_price",
    "order_date",
];

/// Columns every customers file must carry.
pub const CUSTOMER_COLUMNS: [&str; 3] = ["customer_id", "customer_name", "email"];

/// Number of products listed in the report.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Biggest-customer name when nobody spent anything.
pub const NO_PURCHASES: &str = "no purchases";

/// Biggest-customer name when the winning id is absent from the customers table.
pub const CUSTOMER_NOT_FOUND: &str = "customer not found";
