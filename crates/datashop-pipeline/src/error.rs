//! # Pipeline Error Types
//!
//! Error types for the daily pipeline.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pipeline Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │  Quality checks │  │     Transform           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigError    │  │  Validation     │  │  TransformError         │ │
//! │  │   Read/Parse/   │  │  Input (read)   │  │   Core (aggregation)    │ │
//! │  │   Invalid       │  │                 │  │   Store (read/write)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Source check   │  │  Presentation   │                              │
//! │  │                 │  │                 │                              │
//! │  │  SourceFile-    │  │  Presentation   │                              │
//! │  │  NotFound       │  │  (stdout write) │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use datashop_core::{CoreError, ValidationError};
use datashop_store::StoreError;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type alias for the transform step.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can fail a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input file for the run date is absent.
    ///
    /// ## When This Occurs
    /// - Upstream export has not landed yet
    /// - Wrong run date
    /// - Misconfigured input directory
    #[error("Source file not found: {}", path.display())]
    SourceFileNotFound { path: PathBuf },

    /// An input table failed a quality check.
    #[error("Quality checks failed: {0}")]
    Validation(#[from] ValidationError),

    /// An input table could not be read during the quality checks.
    #[error("Quality checks failed: {0}")]
    Input(#[from] StoreError),

    /// Aggregation or report persistence failed.
    #[error("Transformation failed: {0}")]
    Transformation(#[from] TransformError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The console summary could not be written.
    #[error("Failed to present results: {0}")]
    Presentation(#[source] std::io::Error),
}

impl PipelineError {
    /// Short machine-readable label for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::SourceFileNotFound { .. } => "SOURCE_FILE_NOT_FOUND",
            PipelineError::Validation(err) => err.kind(),
            PipelineError::Input(_) => "INPUT_READ_FAILED",
            PipelineError::Transformation(_) => "TRANSFORMATION_ERROR",
            PipelineError::Config(_) => "CONFIG_ERROR",
            PipelineError::Presentation(_) => "PRESENTATION_ERROR",
        }
    }
}

/// Failures inside the transform step.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The tables could not be aggregated.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// An input could not be read or the report could not be written.
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
