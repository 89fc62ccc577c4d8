//! # Domain Types
//!
//! Records read from the input tables and the daily report built from them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  OrderRecord    │   │ CustomerRecord  │   │    DailyReport      │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  order_id       │   │  customer_id    │   │  report_date        │   │
//! │  │  customer_id    │   │  customer_name  │   │  total_sales        │   │
//! │  │  product_id     │   │  email          │   │  biggest_customer   │   │
//! │  │  quantity       │   └─────────────────┘   │  top_5_products     │   │
//! │  │  unit_price     │                         └─────────────────────┘   │
//! │  │  order_date     │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are lenient on purpose: they are built from tables that already
//! passed validation, and the aggregation coerces whatever it cannot parse.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::table::{cell_at, is_null_cell, parse_numeric, Table};
use crate::{CUSTOMER_COLUMNS, ORDER_COLUMNS};

// =============================================================================
// Key
// =============================================================================

/// An identifier cell (order, customer or product id).
///
/// Integral cells are stored as numbers, so `"1"`, `"01"` and `"1.0"` are the
/// same key. Anything else is kept as trimmed text. Ordering puts integers
/// first in numeric order, then text.
///
/// ## Serialization
/// Integer keys serialize as JSON numbers (`101`), text keys as strings
/// (`"C-101"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Integer(i64),
    Text(String),
}

/// Floats above this lose integer precision.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

impl Key {
    /// Creates a key from cell text.
    pub fn new(value: impl AsRef<str>) -> Self {
        let text = value.as_ref().trim();
        if let Ok(id) = text.parse::<i64>() {
            return Key::Integer(id);
        }
        match text.parse::<f64>() {
            Ok(number) if number.fract() == 0.0 && number.abs() <= MAX_EXACT_FLOAT => {
                Key::Integer(number as i64)
            }
            _ => Key::Text(text.to_string()),
        }
    }

    /// Reads an identifier cell; null cells have no key.
    pub fn from_cell(cell: &str) -> Option<Self> {
        if is_null_cell(cell) {
            None
        } else {
            Some(Key::new(cell))
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(id) => write!(f, "{id}"),
            Key::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::new(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Integer(value)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Integer(id) => serializer.serialize_i64(*id),
            Key::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawKey {
            Integer(i64),
            Text(String),
        }

        Ok(match RawKey::deserialize(deserializer)? {
            RawKey::Integer(id) => Key::Integer(id),
            RawKey::Text(text) => Key::new(text),
        })
    }
}

// =============================================================================
// Order Record
// =============================================================================

/// One row of the orders file.
///
/// Ids are `None` for null cells (never the case for `order_id` and
/// `customer_id` once the table passed validation). Unparsable or null
/// numbers are already coerced to `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_id: Option<Key>,
    pub customer_id: Option<Key>,
    pub product_id: Option<Key>,
    pub quantity: f64,
    pub unit_price: f64,
    pub order_date: String,
}

impl OrderRecord {
    /// quantity × unit_price.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Reads every row of an orders table.
    ///
    /// ## Errors
    /// `CoreError::Shape` if a required column is absent.
    pub fn from_table(table: &Table) -> CoreResult<Vec<Self>> {
        crate::validation::require_columns(table, &ORDER_COLUMNS)?;

        let order_id = table.column_index("order_id")?;
        let customer_id = table.column_index("customer_id")?;
        let product_id = table.column_index("product_id")?;
        let quantity = table.column_index("quantity")?;
        let unit_price = table.column_index("unit_price")?;
        let order_date = table.column_index("order_date")?;

        Ok(table
            .rows()
            .map(|row| OrderRecord {
                order_id: Key::from_cell(cell_at(row, order_id)),
                customer_id: Key::from_cell(cell_at(row, customer_id)),
                product_id: Key::from_cell(cell_at(row, product_id)),
                quantity: parse_numeric(cell_at(row, quantity)).unwrap_or(0.0),
                unit_price: parse_numeric(cell_at(row, unit_price)).unwrap_or(0.0),
                order_date: cell_at(row, order_date).trim().to_string(),
            })
            .collect())
    }
}

// =============================================================================
// Customer Record
// =============================================================================

/// One row of the customers file.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub customer_id: Option<Key>,
    pub customer_name: String,
    pub email: String,
}

impl CustomerRecord {
    /// Reads every row of a customers table.
    pub fn from_table(table: &Table) -> CoreResult<Vec<Self>> {
        crate::validation::require_columns(table, &CUSTOMER_COLUMNS)?;

        let customer_id = table.column_index("customer_id")?;
        let customer_name = table.column_index("customer_name")?;
        let email = table.column_index("email")?;

        Ok(table
            .rows()
            .map(|row| CustomerRecord {
                customer_id: Key::from_cell(cell_at(row, customer_id)),
                customer_name: cell_at(row, customer_name).trim().to_string(),
                email: cell_at(row, email).trim().to_string(),
            })
            .collect())
    }
}

// =============================================================================
// Daily Report
// =============================================================================

/// The customer with the highest summed line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiggestCustomer {
    /// `None` when nobody spent anything.
    pub customer_id: Option<Key>,
    pub customer_name: String,
    pub total_spent: Money,
}

/// Aggregated sales of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: Key,
    /// Summed quantity, truncated to whole units.
    pub quantity: i64,
    pub total_sale: Money,
}

/// The artifact produced once per run.
///
/// Field order is the JSON field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Run date (not an order date).
    pub report_date: NaiveDate,
    pub total_sales: Money,
    pub biggest_customer: BiggestCustomer,
    /// At most five products, highest quantity first.
    pub top_5_products: Vec<ProductSales>,
}

// =============================================================================
// Unit Tests
// =============================================================================
