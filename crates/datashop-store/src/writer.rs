//! # Report Writer
//!
//! Persists a computed [`DailyReport`].
//!
//! ## Output Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <output_dir>/                                                          │
//! │  ├── daily_report_2024-01-01.json   always, full report, 2-space indent │
//! │  └── top_products_2024-01-01.csv    only if top_5_products non-empty    │
//! │                                                                         │
//! │  top_products CSV:                                                      │
//! │    product_id,quantity,total_sale                                       │
//! │    1,7,70.00                                                            │
//! │    2,3,45.00                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Files are named by `report_date`, so a second run on the same day
//! overwrites the first run's files.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use datashop_core::{DailyReport, ProductSales};

use crate::error::{StoreError, StoreResult};

/// Header row of the top products file.
pub const TOP_PRODUCTS_HEADER: [&str; 3] = ["product_id", "quantity", "total_sale"];

/// `daily_report_<YYYY-MM-DD>.json`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("daily_report_{}.json", date.format("%Y-%m-%d"))
}

/// `top_products_<YYYY-MM-DD>.csv`
pub fn top_products_file_name(date: NaiveDate) -> String {
    format!("top_products_{}.csv", date.format("%Y-%m-%d"))
}

/// Paths produced by one [`ReportWriter::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub json_path: PathBuf,
    /// `None` when the report lists no products.
    pub csv_path: Option<PathBuf>,
}

/// Writes reports into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Creates a writer; the directory is created on first write.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ReportWriter {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the JSON report and, if there are products, the CSV side-file.
    ///
    /// ## Errors
    /// - `StoreError::Write` if the directory or a file cannot be written
    /// - `StoreError::CsvWrite` if the side-file cannot be encoded
    /// - `StoreError::Serialize` if the report cannot be serialized
    pub fn write(&self, report: &DailyReport) -> StoreResult<WrittenReport> {
        fs::create_dir_all(&self.output_dir).map_err(|source| StoreError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let json_path = self.output_dir.join(report_file_name(report.report_date));
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&json_path, json).map_err(|source| StoreError::Write {
            path: json_path.clone(),
            source,
        })?;
        info!(path = %json_path.display(), "Daily report written");

        let csv_path = if report.top_5_products.is_empty() {
            debug!("No products sold, skipping top products file");
            None
        } else {
            let path = self
                .output_dir
                .join(top_products_file_name(report.report_date));
            write_top_products(&path, &report.top_5_products)?;
            info!(
                path = %path.display(),
                products = report.top_5_products.len(),
                "Top products written"
            );
            Some(path)
        };

        Ok(WrittenReport {
            json_path,
            csv_path,
        })
    }
}

fn write_top_products(path: &Path, products: &[ProductSales]) -> StoreResult<()> {
    let csv_error = |source| StoreError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(TOP_PRODUCTS_HEADER).map_err(csv_error)?;
    for product in products {
        writer
            .write_record([
                product.product_id.to_string(),
                product.quantity.to_string(),
                product.total_sale.to_plain_string(),
            ])
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use datashop_core::{BiggestCustomer, Key, Money};
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn report(products: Vec<ProductSales>) -> DailyReport {
        DailyReport {
            report_date: date(),
            total_sales: Money::from_cents(11500),
            biggest_customer: BiggestCustomer {
                customer_id: Some(Key::from(101)),
                customer_name: "Juan Pérez".to_string(),
                total_spent: Money::from_cents(7000),
            },
            top_5_products: products,
        }
    }

    fn products() -> Vec<ProductSales> {
        vec![
            ProductSales {
                product_id: Key::from(1),
                quantity: 7,
                total_sale: Money::from_cents(7000),
            },
            ProductSales {
                product_id: Key::from(2),
                quantity: 3,
                total_sale: Money::from_cents(4500),
            },
        ]
    }

    #[test]
    fn test_file_names() {
        assert_eq!(report_file_name(date()), "daily_report_2024-01-01.json");
        assert_eq!(top_products_file_name(date()), "top_products_2024-01-01.csv");
    }

    #[test]
    fn test_writes_json_and_csv() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());
        let report = report(products());

        let written = writer.write(&report).unwrap();

        assert_eq!(written.json_path, dir.path().join("daily_report_2024-01-01.json"));
        let json = fs::read_to_string(&written.json_path).unwrap();
        let back: DailyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["report_date"], "2024-01-01");
        assert_eq!(value["total_sales"], 115.0);
        assert_eq!(value["biggest_customer"]["customer_id"], 101);
        assert_eq!(value["top_5_products"][0]["quantity"], 7);

        let csv_path = written.csv_path.unwrap();
        assert_eq!(
            fs::read_to_string(csv_path).unwrap(),
            "product_id,quantity,total_sale\n1,7,70.00\n2,3,45.00\n"
        );
    }

    #[test]
    fn test_csv_amounts_have_two_decimals_json_does_not() {
        let dir = TempDir::new().unwrap();
        let report = report(vec![
            ProductSales {
                product_id: Key::from("SKU-9"),
                quantity: 2,
                total_sale: Money::from_cents(123_450),
            },
            ProductSales {
                product_id: Key::from(3),
                quantity: 1,
                total_sale: Money::from_cents(5),
            },
        ]);

        let written = ReportWriter::new(dir.path()).write(&report).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written.json_path).unwrap()).unwrap();
        assert_eq!(json["top_5_products"][0]["product_id"], "SKU-9");
        assert_eq!(json["top_5_products"][0]["total_sale"], 1234.5);
        assert_eq!(json["top_5_products"][1]["total_sale"], 0.05);

        let csv = fs::read_to_string(written.csv_path.unwrap()).unwrap();
        assert_eq!(csv, "product_id,quantity,total_sale\nSKU-9,2,1234.50\n3,1,0.05\n");
    }

    #[test]
    fn test_no_products_skips_csv() {
        let dir = TempDir::new().unwrap();
        let written = ReportWriter::new(dir.path()).write(&report(vec![])).unwrap();

        assert!(written.json_path.exists());
        assert_eq!(written.csv_path, None);
        assert!(!dir.path().join("top_products_2024-01-01.csv").exists());
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("output");

        let written = ReportWriter::new(&nested).write(&report(products())).unwrap();

        assert!(nested.is_dir());
        assert!(written.json_path.starts_with(&nested));
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());
        let report = report(products());

        let first = writer.write(&report).unwrap();
        let json_before = fs::read(&first.json_path).unwrap();
        let csv_before = fs::read(first.csv_path.as_ref().unwrap()).unwrap();

        let second = writer.write(&report).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second.json_path).unwrap(), json_before);
        assert_eq!(fs::read(second.csv_path.unwrap()).unwrap(), csv_before);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_unwritable_directory() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let err = ReportWriter::new(blocker.join("out"))
            .write(&report(vec![]))
            .unwrap_err();

        assert!(matches!(err, StoreError::Write { .. }));
    }
}
