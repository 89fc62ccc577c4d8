//! # Presentation Step
//!
//! Console summary of a finished report. The warehouse load is simulated:
//! the summary is printed and a confirmation line follows.
//!
//! ## Summary Layout
//! ```text
//! ==================================================
//! DAILY REPORT - DATASHOP
//! ==================================================
//! Total sales: $65.00
//! Top customer: Juan Pérez
//! Amount spent: $50.00
//!
//! Top 5 products:
//!   1. Product 1: 5 units
//!   2. Product 2: 1 units
//! ==================================================
//! ```

use std::io::Write;
use tracing::info;

use datashop_core::DailyReport;

use crate::error::{PipelineError, PipelineResult};

/// Width of the `=` rules.
const RULE_WIDTH: usize = 50;

/// Printed after the summary by the presentation step.
pub const LOADED_MESSAGE: &str = "Results 'loaded' to data warehouse (simulated)";

/// Renders the console summary, one trailing newline included.
pub fn render_summary(report: &DailyReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    let mut lines = vec![
        rule.clone(),
        "DAILY REPORT - DATASHOP".to_string(),
        rule.clone(),
        format!("Total sales: {}", report.total_sales),
        format!("Top customer: {}", report.biggest_customer.customer_name),
        format!("Amount spent: {}", report.biggest_customer.total_spent),
        String::new(),
        "Top 5 products:".to_string(),
    ];
    lines.extend(
        report
            .top_5_products
            .iter()
            .enumerate()
            .map(|(i, product)| {
                format!(
                    "  {}. Product {}: {} units",
                    i + 1,
                    product.product_id,
                    product.quantity
                )
            }),
    );
    lines.push(rule);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes the summary and the load confirmation.
///
/// ## Errors
/// `PipelineError::Presentation` if `out` rejects the write.
pub fn present<W: Write>(report: &DailyReport, out: &mut W) -> PipelineResult<()> {
    write!(out, "{}", render_summary(report)).map_err(PipelineError::Presentation)?;
    writeln!(out, "{LOADED_MESSAGE}").map_err(PipelineError::Presentation)?;
    out.flush().map_err(PipelineError::Presentation)?;

    info!(report_date = %report.report_date, "Results loaded");
    Ok(())
}
