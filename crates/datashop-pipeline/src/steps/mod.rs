//! # Pipeline Steps
//!
//! The four steps of a daily run, each callable on its own.
//!
//! ```text
//! check_source_files ──► run_quality_checks ──► transform ──► present
//!   (paths exist?)        (validate tables)     (aggregate,    (console
//!                                                write files)   summary)
//! ```
//!
//! Steps do not retry; [`DailyPipeline`](crate::DailyPipeline) does.

pub mod present;
pub mod quality;
pub mod source;
pub mod transform;

pub use present::{present, render_summary, LOADED_MESSAGE};
pub use quality::{check_customers, check_orders, run_quality_checks, QualityReport};
pub use source::{check_source_files, SourceFiles};
pub use transform::transform;
