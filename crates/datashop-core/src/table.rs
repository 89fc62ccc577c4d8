//! # Table Module
//!
//! The raw row set the quality checks run against.
//!
//! A `Table` is exactly what came out of the CSV reader: a header row and
//! string cells. Nothing is typed yet, which is the point: the validator has
//! to see missing columns, empty cells and garbage numbers as they are.
//!
//! ## Cell Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cell text (trimmed)        is_null_cell    parse_numeric               │
//! │  ───────────────────        ────────────    ─────────────               │
//! │  ""                         true            None                        │
//! │  "NA" / "NaN" / "null" …    true            None                        │
//! │  "12"  "-1"  "10.50"        false           Some(12.0) …                │
//! │  "abc"  "1e400"  "inf"      false           None                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};

/// Cell texts treated as missing values, matching the defaults of common
/// tabular tooling.
pub const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if the cell holds no value.
pub fn is_null_cell(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NULL_MARKERS.contains(&cell)
}

/// Parses a cell as a finite number.
///
/// ## Example
/// ```rust
/// use datashop_core::table::parse_numeric;
///
/// assert_eq!(parse_numeric(" 10.5 "), Some(10.5));
/// assert_eq!(parse_numeric("ten"), None);
/// assert_eq!(parse_numeric(""), None);
/// ```
pub fn parse_numeric(cell: &str) -> Option<f64> {
    if is_null_cell(cell) {
        return None;
    }
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// An in-memory row set with named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table.
    ///
    /// `name` only labels error messages ("orders", "customers"). Header
    /// names are trimmed. Rows shorter than the header read as null in the
    /// missing positions.
    pub fn new<H, R, C>(
        name: impl Into<String>,
        headers: impl IntoIterator<Item = H>,
        rows: impl IntoIterator<Item = R>,
    ) -> Self
    where
        H: Into<String>,
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Table {
            name: name.into(),
            headers: headers
                .into_iter()
                .map(|h| h.into().trim().to_string())
                .collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Label used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if a column with this name exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// Position of the first column with this name.
    pub fn column_index(&self, column: &str) -> CoreResult<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| CoreError::UnknownColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Iterates over the cells of one column, top to bottom.
    pub fn column(&self, column: &str) -> CoreResult<impl Iterator<Item = &str> + '_> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| cell_at(row, index)))
    }

    /// Iterates over rows as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }
}

/// Cell lookup that tolerates ragged rows.
pub(crate) fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            "orders",
            vec![" order_id", "quantity "],
            vec![vec!["1", "2"], vec!["2"]],
        )
    }

    #[test]
    fn test_headers_are_trimmed() {
        let table = sample();
        assert_eq!(table.headers(), &["order_id".to_string(), "quantity".to_string()]);
        assert!(table.has_column("quantity"));
        assert!(!table.has_column("unit_price"));
    }

    #[test]
    fn test_column_tolerates_short_rows() {
        let table = sample();
        let cells: Vec<&str> = table.column("quantity").unwrap().collect();
        assert_eq!(cells, vec!["2", ""]);
    }

    #[test]
    fn test_unknown_column() {
        let table = sample();
        assert!(matches!(
            table.column_index("email"),
            Err(CoreError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_null_markers() {
        assert!(is_null_cell(""));
        assert!(is_null_cell("   "));
        assert!(is_null_cell("NaN"));
        assert!(is_null_cell(" null "));
        assert!(!is_null_cell("0"));
        assert!(!is_null_cell("none"));
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("3"), Some(3.0));
        assert_eq!(parse_numeric("-1"), Some(-1.0));
        assert_eq!(parse_numeric("1e400"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("NA"), None);
        assert_eq!(parse_numeric("12 units"), None);
    }
}
