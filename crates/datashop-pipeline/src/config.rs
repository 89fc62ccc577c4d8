//! # Pipeline Configuration
//!
//! Where the inputs live, where reports go, and how failed steps retry.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DATASHOP_INPUT_DIR=/mnt/exports                                    │
//! │     DATASHOP_MAX_RETRIES=3                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ./datashop.toml (or --config PATH)                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     data/input, data/output, 1 retry after 300s                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # datashop.toml
//! [paths]
//! input_dir = "data/input"
//! output_dir = "data/output"
//! customers_file = "customers.csv"
//! orders_prefix = "orders_"
//!
//! [retry]
//! max_retries = 1
//! delay_secs = 300
//!
//! [validation]
//! strict_numeric = false
//! unique_customers = false
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use datashop_core::ValidationOptions;

use crate::error::{ConfigError, ConfigResult};
use crate::runner::RetryPolicy;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "datashop.toml";

// =============================================================================
// Path Settings
// =============================================================================

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory holding the daily orders files and the customers file.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory the report files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Customers file name inside `input_dir`.
    #[serde(default = "default_customers_file")]
    pub customers_file: String,

    /// Orders files are named `<orders_prefix><YYYY-MM-DD>.csv`.
    #[serde(default = "default_orders_prefix")]
    pub orders_prefix: String,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data/input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

fn default_customers_file() -> String {
    "customers.csv".to_string()
}

fn default_orders_prefix() -> String {
    "orders_".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        PathSettings {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            customers_file: default_customers_file(),
            orders_prefix: default_orders_prefix(),
        }
    }
}

impl PathSettings {
    /// Orders file for a run date.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use datashop_pipeline::config::PathSettings;
    ///
    /// let paths = PathSettings::default();
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// assert_eq!(
    ///     paths.orders_path(date),
    ///     std::path::Path::new("data/input/orders_2024-01-01.csv")
    /// );
    /// ```
    pub fn orders_path(&self, date: NaiveDate) -> PathBuf {
        self.input_dir.join(format!(
            "{}{}.csv",
            self.orders_prefix,
            date.format("%Y-%m-%d")
        ))
    }

    /// The customers file (not dated).
    pub fn customers_path(&self) -> PathBuf {
        self.input_dir.join(&self.customers_file)
    }
}

// =============================================================================
// Retry Settings
// =============================================================================

/// Whole-step retry behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Retries after the first failed attempt of a step. 0 disables retries.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed wait between attempts (seconds).
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
}

fn default_max_retries() -> u32 {
    1
}

fn default_delay_secs() -> u64 {
    300
}

impl Default for RetrySettings {
    fn default() -> Self {
        RetrySettings {
            max_retries: default_max_retries(),
            delay_secs: default_delay_secs(),
        }
    }
}

impl RetrySettings {
    /// Converts to the policy the runner applies.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_secs(self.delay_secs))
    }
}

// =============================================================================
// Main Pipeline Configuration
// =============================================================================

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub retry: RetrySettings,

    /// Optional stricter quality checks.
    #[serde(default)]
    pub validation: ValidationOptions,
}

impl PipelineConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `./datashop.toml`)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            info!(?path, "Loading pipeline config from file");
            Self::from_file(&path)?
        } else {
            debug!(?path, "Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.paths.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input_dir must not be empty".into()));
        }

        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_dir must not be empty".into()));
        }

        if self.paths.customers_file.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "customers_file must not be empty".into(),
            ));
        }

        if self.paths.orders_prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "orders_prefix must be a file name prefix, got: {}",
                self.paths.orders_prefix
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("DATASHOP_INPUT_DIR") {
            debug!(input_dir = %dir, "Overriding input directory from environment");
            self.paths.input_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("DATASHOP_OUTPUT_DIR") {
            debug!(output_dir = %dir, "Overriding output directory from environment");
            self.paths.output_dir = PathBuf::from(dir);
        }

        if let Some(retries) = lookup("DATASHOP_MAX_RETRIES") {
            match retries.parse::<u32>() {
                Ok(n) => self.retry.max_retries = n,
                Err(_) => warn!(value = %retries, "Ignoring invalid DATASHOP_MAX_RETRIES"),
            }
        }

        if let Some(delay) = lookup("DATASHOP_RETRY_DELAY_SECS") {
            match delay.parse::<u64>() {
                Ok(secs) => self.retry.delay_secs = secs,
                Err(_) => warn!(value = %delay, "Ignoring invalid DATASHOP_RETRY_DELAY_SECS"),
            }
        }

        if let Some(strict) = lookup("DATASHOP_STRICT_NUMERIC") {
            match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.validation.strict_numeric = true,
                "0" | "false" | "no" | "off" => self.validation.strict_numeric = false,
                _ => warn!(value = %strict, "Ignoring invalid DATASHOP_STRICT_NUMERIC"),
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Orders file for a run date.
    pub fn orders_path(&self, date: NaiveDate) -> PathBuf {
        self.paths.orders_path(date)
    }

    /// The customers file.
    pub fn customers_path(&self) -> PathBuf {
        self.paths.customers_path()
    }

    /// Report output directory.
    pub fn output_dir(&self) -> &Path {
        &self.paths.output_dir
    }

    /// Retry policy for every step.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.policy()
    }
}
