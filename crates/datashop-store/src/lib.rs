//! # datashop-store: File Layer for the DataShop Daily Report
//!
//! Reads the CSV inputs into [`Table`]s and persists finished reports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DataShop Daily Data Flow                           │
//! │                                                                         │
//! │  data/input/orders_2024-01-01.csv     data/input/customers.csv          │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  datashop-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐                    ┌─────────────────────┐ │   │
//! │  │   │    reader     │                    │       writer        │ │   │
//! │  │   │  read_table   │                    │    ReportWriter     │ │   │
//! │  │   └───────┬───────┘                    └──────────▲──────────┘ │   │
//! │  └───────────┼───────────────────────────────────────┼────────────┘   │
//! │              ▼                                       │                 │
//! │        Table ──► datashop-core ──► DailyReport ──────┘                 │
//! │                                                                         │
//! │  data/output/daily_report_2024-01-01.json                               │
//! │  data/output/top_products_2024-01-01.csv   (only if products exist)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`reader`] - CSV file to [`Table`]
//! - [`writer`] - [`DailyReport`](datashop_core::DailyReport) to JSON + CSV
//! - [`error`] - File layer error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use datashop_store::{read_customers, read_orders, ReportWriter};
//!
//! let orders = read_orders("data/input/orders_2024-01-01.csv")?;
//! let customers = read_customers("data/input/customers.csv")?;
//!
//! let report = datashop_core::compute_daily_report(&orders, &customers, date)?;
//! let written = ReportWriter::new("data/output").write(&report)?;
//! println!("{}", written.json_path.display());
//! ```
//!
//! [`Table`]: datashop_core::Table

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod reader;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use reader::{read_customers, read_orders, read_table};
pub use writer::{report_file_name, top_products_file_name, ReportWriter, WrittenReport};
