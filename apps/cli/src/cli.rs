//! Command-line argument definitions.

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Orders file used when none is given.
pub const DEFAULT_ORDERS: &str = "data/input/orders_2024-01-01.csv";

/// Customers file used when none is given.
pub const DEFAULT_CUSTOMERS: &str = "data/input/customers.csv";

/// Output directory of the standalone transform.
pub const DEFAULT_OUTPUT: &str = "data/output/";

/// DataShop daily sales report
#[derive(Parser, Debug)]
#[command(name = "datashop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Run the quality checks on an orders and a customers file
    Validate {
        /// Orders CSV
        #[arg(default_value = DEFAULT_ORDERS)]
        orders: PathBuf,

        /// Customers CSV
        #[arg(default_value = DEFAULT_CUSTOMERS)]
        customers: PathBuf,
    },

    /// Compute and write today's report from the default input files
    Transform,

    /// Run the full daily pipeline for one date
    Run {
        /// Run date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Path to the pipeline configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
