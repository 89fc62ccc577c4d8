//! # Store Error Types
//!
//! Error types for file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  csv::Error / io::Error / serde_json::Error                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path that failed                  │
//! │       │                                                                 │
//! │       ├──► PipelineError::Input          (reading, quality-check step) │
//! │       └──► TransformError::Store         (writing, transform step)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// File operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An input CSV could not be opened or parsed.
    ///
    /// ## When This Occurs
    /// - File missing or unreadable
    /// - Malformed quoting
    /// - Invalid UTF-8
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A file or directory could not be written.
    ///
    /// ## When This Occurs
    /// - Output directory cannot be created
    /// - Permission denied
    /// - Disk full
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The top products side-file could not be encoded.
    #[error("Failed to write CSV {}: {source}", path.display())]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for file operations.
pub type StoreResult<T> = Result<T, StoreError>;
