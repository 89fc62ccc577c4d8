//! # Transform Step
//!
//! Reads the inputs, computes the report, writes it.
//!
//! The report is returned only once both output files are on disk, so a
//! caller never sees a report that was not persisted.

use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

use datashop_core::{compute_daily_report, DailyReport};
use datashop_store::{read_customers, read_orders, ReportWriter};

use crate::error::TransformResult;

/// Computes and persists the daily report.
///
/// `run_date` becomes `report_date` and names the output files.
///
/// ## Errors
/// - `TransformError::Store` if an input cannot be read or an output cannot
///   be written
/// - `TransformError::Core` if a table lacks a column the aggregation needs
pub fn transform(
    orders_path: &Path,
    customers_path: &Path,
    output_dir: &Path,
    run_date: NaiveDate,
) -> TransformResult<DailyReport> {
    let orders = read_orders(orders_path)?;
    let customers = read_customers(customers_path)?;

    let report = compute_daily_report(&orders, &customers, run_date)?;
    info!(
        total_sales = %report.total_sales,
        products = report.top_5_products.len(),
        biggest_customer = %report.biggest_customer.customer_name,
        "Daily metrics computed"
    );

    let written = ReportWriter::new(output_dir).write(&report)?;
    info!(
        json = %written.json_path.display(),
        top_products_written = written.csv_path.is_some(),
        "Transformation complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use datashop_core::Money;
    use tempfile::TempDir;

    const ORDERS: &str = "order_id,customer_id,product_id,quantity,unit_price,order_date\n\
                          1,101,1,2,10.0,2024-01-01\n\
                          2,102,2,1,15.0,2024-01-01\n\
                          3,101,1,3,10.0,2024-01-01\n";

    const CUSTOMERS: &str = "customer_id,customer_name,email\n\
                             101,Juan Pérez,juan@email.com\n\
                             102,María García,maria@email.com\n";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn inputs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let orders = dir.path().join("orders.csv");
        let customers = dir.path().join("customers.csv");
        std::fs::write(&orders, ORDERS).unwrap();
        std::fs::write(&customers, CUSTOMERS).unwrap();
        (orders, customers)
    }

    #[test]
    fn test_transform_writes_report() {
        let dir = TempDir::new().unwrap();
        let (orders, customers) = inputs(&dir);
        let output = dir.path().join("output");

        let report = transform(&orders, &customers, &output, date()).unwrap();

        assert_eq!(report.total_sales, Money::from_cents(6500));
        assert_eq!(report.biggest_customer.customer_name, "Juan Pérez");
        assert!(output.join("daily_report_2024-01-01.json").is_file());
        assert!(output.join("top_products_2024-01-01.csv").is_file());

        let json = std::fs::read_to_string(output.join("daily_report_2024-01-01.json")).unwrap();
        let persisted: DailyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(persisted, report);
    }

    #[test]
    fn test_transform_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let (orders, customers) = inputs(&dir);
        let output = dir.path().join("output");
        let json_path = output.join("daily_report_2024-01-01.json");

        transform(&orders, &customers, &output, date()).unwrap();
        let first = std::fs::read(&json_path).unwrap();
        transform(&orders, &customers, &output, date()).unwrap();
        let second = std::fs::read(&json_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_write_failure_is_transform_error() {
        let dir = TempDir::new().unwrap();
        let (orders, customers) = inputs(&dir);
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = transform(&orders, &customers, &blocker.join("out"), date()).unwrap_err();
        assert!(matches!(err, TransformError::Store(_)));
    }

    #[test]
    fn test_missing_column_is_core_error() {
        let dir = TempDir::new().unwrap();
        let orders = dir.path().join("orders.csv");
        let customers = dir.path().join("customers.csv");
        std::fs::write(&orders, "order_id,customer_id\n1,101\n").unwrap();
        std::fs::write(&customers, CUSTOMERS).unwrap();

        let err = transform(&orders, &customers, dir.path(), date()).unwrap_err();
        assert!(matches!(err, TransformError::Core(_)));
        assert!(!dir.path().join("daily_report_2024-01-01.json").exists());
    }
}
