//! # Metrics Module
//!
//! Builds the daily report from validated tables.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders rows                                                            │
//! │     │  quantity, unit_price coerced (unparsable → 0)                    │
//! │     ▼                                                                   │
//! │  line_total = quantity × unit_price                                     │
//! │     │                                                                   │
//! │     ├──► Σ line_total ──────────────────────────► total_sales           │
//! │     │                                                                   │
//! │     ├──► group by product_id (first-seen order)                         │
//! │     │       Σ quantity, Σ line_total                                    │
//! │     │       stable sort by quantity desc, take 5 ──► top_5_products     │
//! │     │                                                                   │
//! │     └──► group by customer_id (first-seen order)                        │
//! │             Σ line_total, ties go to the lowest id                      │
//! │             look up name in customers ──────────► biggest_customer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sums stay in f64 and are rounded to cents only when the report is
//! assembled.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::CoreResult;
use crate::money::Money;
use crate::table::Table;
use crate::types::{BiggestCustomer, CustomerRecord, DailyReport, Key, OrderRecord, ProductSales};
use crate::{CUSTOMER_NOT_FOUND, NO_PURCHASES, TOP_PRODUCTS_LIMIT};

/// Computes the daily report.
///
/// Pure: the run date is an argument, nothing is read or written.
///
/// ## Errors
/// `CoreError::Shape` if either table lacks a required column. Cell contents
/// never fail; run the validators first to reject bad data.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use datashop_core::{compute_daily_report, Table, NO_PURCHASES};
///
/// let orders = Table::new(
///     "orders",
///     vec!["order_id", "customer_id", "product_id", "quantity", "unit_price", "order_date"],
///     Vec::<Vec<&str>>::new(),
/// );
/// let customers = Table::new("customers", vec!["customer_id", "customer_name", "email"], vec![vec!["101", "Test", "t@email.com"]]);
///
/// let report = compute_daily_report(&orders, &customers, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
/// assert!(report.total_sales.is_zero());
/// assert!(report.top_5_products.is_empty());
/// assert_eq!(report.biggest_customer.customer_name, NO_PURCHASES);
/// ```
pub fn compute_daily_report(
    orders: &Table,
    customers: &Table,
    report_date: NaiveDate,
) -> CoreResult<DailyReport> {
    let orders = OrderRecord::from_table(orders)?;
    let customers = CustomerRecord::from_table(customers)?;
    Ok(aggregate(&orders, &customers, report_date))
}

/// Aggregates already-parsed records.
pub fn aggregate(
    orders: &[OrderRecord],
    customers: &[CustomerRecord],
    report_date: NaiveDate,
) -> DailyReport {
    let total: f64 = orders.iter().map(OrderRecord::line_total).sum();

    DailyReport {
        report_date,
        total_sales: Money::from_amount(total),
        biggest_customer: biggest_customer(orders, customers),
        top_5_products: top_products(orders, TOP_PRODUCTS_LIMIT),
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Sums values per key, keeping groups in first-seen order.
///
/// Records without a key are left out of every group.
struct Groups<T> {
    index: HashMap<Key, usize>,
    entries: Vec<(Key, T)>,
}

impl<T: Default> Groups<T> {
    fn new() -> Self {
        Groups {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn entry(&mut self, key: &Key) -> &mut T {
        let position = match self.index.get(key).copied() {
            Some(position) => position,
            None => {
                self.entries.push((key.clone(), T::default()));
                self.index.insert(key.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    fn into_entries(self) -> Vec<(Key, T)> {
        self.entries
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ProductTotals {
    quantity: f64,
    line_total: f64,
}

/// Products with the highest summed quantity, ties in first-seen order.
pub fn top_products(orders: &[OrderRecord], limit: usize) -> Vec<ProductSales> {
    let mut groups: Groups<ProductTotals> = Groups::new();
    for order in orders {
        if let Some(product_id) = &order.product_id {
            let totals = groups.entry(product_id);
            totals.quantity += order.quantity;
            totals.line_total += order.line_total();
        }
    }

    let mut ranked = groups.into_entries();
    // sort_by is stable, so equal quantities keep first-seen order
    ranked.sort_by(|(_, a), (_, b)| b.quantity.total_cmp(&a.quantity));

    ranked
        .into_iter()
        .take(limit)
        .map(|(product_id, totals)| ProductSales {
            product_id,
            quantity: totals.quantity as i64,
            total_sale: Money::from_amount(totals.line_total),
        })
        .collect()
}

/// The customer with the greatest summed line total.
///
/// Equal spends go to the customer with the lowest id (see [`Key`] ordering).
///
/// ## Outcomes
/// ```text
/// no orders / best spend is 0   → id None, "no purchases", $0.00
/// best id not in customers      → id Some, "customer not found", spend
/// otherwise                     → id Some, first matching name, spend
/// ```
pub fn biggest_customer(orders: &[OrderRecord], customers: &[CustomerRecord]) -> BiggestCustomer {
    let mut groups: Groups<f64> = Groups::new();
    for order in orders {
        if let Some(customer_id) = &order.customer_id {
            *groups.entry(customer_id) += order.line_total();
        }
    }

    let mut best: Option<(Key, f64)> = None;
    for (customer_id, spent) in groups.into_entries() {
        let is_better = match &best {
            Some((best_id, best_spent)) => {
                spent > *best_spent || (spent == *best_spent && customer_id < *best_id)
            }
            None => true,
        };
        if is_better {
            best = Some((customer_id, spent));
        }
    }

    match best {
        Some((customer_id, spent)) if spent > 0.0 => {
            let customer_name = customers
                .iter()
                .find(|customer| customer.customer_id.as_ref() == Some(&customer_id))
                .map(|customer| customer.customer_name.clone())
                .unwrap_or_else(|| CUSTOMER_NOT_FOUND.to_string());

            BiggestCustomer {
                customer_id: Some(customer_id),
                customer_name,
                total_spent: Money::from_amount(spent),
            }
        }
        _ => BiggestCustomer {
            customer_id: None,
            customer_name: NO_PURCHASES.to_string(),
            total_spent: Money::zero(),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CUSTOMER_COLUMNS, ORDER_COLUMNS};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn orders(rows: Vec<Vec<&str>>) -> Table {
        Table::new("orders", ORDER_COLUMNS, rows)
    }

    fn customers(rows: Vec<Vec<&str>>) -> Table {
        Table::new("customers", CUSTOMER_COLUMNS, rows)
    }

    #[test]
    fn test_calculate_total_sales() {
        let orders = orders(vec![
            vec!["1", "101", "1", "2", "10.0", "2024-01-01"],
            vec!["2", "102", "2", "1", "15.0", "2024-01-01"],
            vec!["3", "101", "1", "3", "10.0", "2024-01-01"],
        ]);
        let customers = customers(vec![
            vec!["101", "Juan Pérez", "juan@email.com"],
            vec!["102", "María García", "maria@email.com"],
        ]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        // (2 × 10.0) + (1 × 15.0) + (3 × 10.0)
        assert_eq!(report.total_sales, Money::from_cents(6500));
        assert_eq!(report.biggest_customer.customer_id, Some(Key::from(101)));
        assert_eq!(report.biggest_customer.customer_name, "Juan Pérez");
        assert_eq!(report.biggest_customer.total_spent, Money::from_cents(5000));
    }

    #[test]
    fn test_find_top_product() {
        let orders = orders(vec![
            vec!["1", "101", "1", "5", "10.0", "2024-01-01"],
            vec!["2", "102", "2", "3", "15.0", "2024-01-01"],
            vec!["3", "103", "1", "2", "10.0", "2024-01-01"],
        ]);
        let customers = customers(vec![
            vec!["101", "A", "a@email.com"],
            vec!["102", "B", "b@email.com"],
            vec!["103", "C", "c@email.com"],
        ]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        let top = &report.top_5_products[0];
        assert_eq!(top.product_id, Key::from(1));
        assert_eq!(top.quantity, 7);
        assert_eq!(top.total_sale, Money::from_cents(7000));
        assert_eq!(report.top_5_products[1].product_id, Key::from(2));
        assert_eq!(report.top_5_products[1].quantity, 3);
    }

    #[test]
    fn test_handle_empty_data() {
        let orders = orders(vec![]);
        let customers = customers(vec![vec!["101", "Test", "test@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        assert!(report.total_sales.is_zero());
        assert!(report.top_5_products.is_empty());
        assert_eq!(report.biggest_customer.customer_id, None);
        assert_eq!(report.biggest_customer.customer_name, NO_PURCHASES);
        assert!(report.biggest_customer.total_spent.is_zero());
    }

    #[test]
    fn test_top_five_limit_and_tie_order() {
        let orders = orders(vec![
            vec!["1", "101", "p6", "1", "1.0", "d"],
            vec!["2", "101", "p2", "4", "1.0", "d"],
            vec!["3", "101", "p3", "4", "1.0", "d"],
            vec!["4", "101", "p4", "2", "1.0", "d"],
            vec!["5", "101", "p5", "9", "1.0", "d"],
            vec!["6", "101", "p1", "2", "1.0", "d"],
        ]);
        let records = OrderRecord::from_table(&orders).unwrap();

        let ranked: Vec<String> = top_products(&records, 5)
            .into_iter()
            .map(|p| p.product_id.to_string())
            .collect();

        assert_eq!(ranked, vec!["p5", "p2", "p3", "p4", "p1"]);
    }

    #[test]
    fn test_fewer_than_five_products() {
        let orders = orders(vec![
            vec!["1", "101", "1", "1", "1.0", "d"],
            vec!["2", "101", "2", "1", "1.0", "d"],
        ]);
        let records = OrderRecord::from_table(&orders).unwrap();
        assert_eq!(top_products(&records, TOP_PRODUCTS_LIMIT).len(), 2);
    }

    #[test]
    fn test_null_product_counts_toward_totals_only() {
        let orders = orders(vec![
            vec!["1", "101", "", "4", "2.5", "d"],
            vec!["2", "101", "9", "1", "1.0", "d"],
        ]);
        let customers = customers(vec![vec!["101", "Ana", "ana@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        assert_eq!(report.total_sales, Money::from_cents(1100));
        assert_eq!(report.top_5_products.len(), 1);
        assert_eq!(report.biggest_customer.total_spent, Money::from_cents(1100));
    }

    #[test]
    fn test_non_numeric_values_coerce_to_zero() {
        let orders = orders(vec![
            vec!["1", "101", "1", "lots", "10.0", "d"],
            vec!["2", "102", "2", "2", "cheap", "d"],
            vec!["3", "103", "3", "1", "4.0", "d"],
        ]);
        let customers = customers(vec![vec!["103", "Cleo", "c@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        assert_eq!(report.total_sales, Money::from_cents(400));
        assert_eq!(report.biggest_customer.customer_name, "Cleo");
    }

    #[test]
    fn test_customer_not_found() {
        let orders = orders(vec![vec!["1", "999", "1", "2", "3.0", "d"]]);
        let customers = customers(vec![vec!["101", "Ana", "ana@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        assert_eq!(report.biggest_customer.customer_id, Some(Key::from(999)));
        assert_eq!(report.biggest_customer.customer_name, CUSTOMER_NOT_FOUND);
        assert_eq!(report.biggest_customer.total_spent, Money::from_cents(600));
    }

    #[test]
    fn test_zero_spend_is_no_purchases() {
        let orders = orders(vec![vec!["1", "101", "1", "2", "0", "d"]]);
        let customers = customers(vec![vec!["101", "Ana", "ana@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        assert_eq!(report.biggest_customer.customer_id, None);
        assert_eq!(report.biggest_customer.customer_name, NO_PURCHASES);
        assert_eq!(report.top_5_products[0].quantity, 2);
    }

    #[test]
    fn test_biggest_customer_tie_goes_to_lowest_id() {
        let orders = orders(vec![
            vec!["1", "202", "1", "1", "5.0", "d"],
            vec!["2", "101", "1", "1", "5.0", "d"],
        ]);
        let customers = customers(vec![
            vec!["101", "Ana", "a@email.com"],
            vec!["202", "Bo", "b@email.com"],
        ]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();
        assert_eq!(report.biggest_customer.customer_id, Some(Key::from(101)));
        assert_eq!(report.biggest_customer.customer_name, "Ana");
    }

    #[test]
    fn test_biggest_customer_tie_compares_ids_numerically() {
        let orders = orders(vec![
            vec!["1", "20", "1", "1", "5.0", "d"],
            vec!["2", "3", "1", "1", "5.0", "d"],
        ]);
        let records = OrderRecord::from_table(&orders).unwrap();

        let winner = biggest_customer(&records, &[]);
        assert_eq!(winner.customer_id, Some(Key::from(3)));
    }

    #[test]
    fn test_equivalent_product_ids_share_a_group() {
        let orders = orders(vec![
            vec!["1", "101", "1", "2", "1.0", "d"],
            vec!["2", "101", "01", "3", "1.0", "d"],
        ]);
        let records = OrderRecord::from_table(&orders).unwrap();

        let top = top_products(&records, TOP_PRODUCTS_LIMIT);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product_id, Key::from(1));
        assert_eq!(top[0].quantity, 5);
        assert_eq!(top[0].total_sale, Money::from_cents(500));
    }

    #[test]
    fn test_float_customer_id_matches_integer_id() {
        let orders = orders(vec![vec!["1", "101.0", "1", "2", "3.0", "d"]]);
        let customers = customers(vec![vec!["101", "Ana", "ana@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();
        assert_eq!(report.biggest_customer.customer_id, Some(Key::from(101)));
        assert_eq!(report.biggest_customer.customer_name, "Ana");
    }

    #[test]
    fn test_duplicate_customer_rows_use_first_name() {
        let orders = orders(vec![vec!["1", "101", "1", "1", "5.0", "d"]]);
        let customers = customers(vec![
            vec!["101", "First", "a@email.com"],
            vec!["101", "Second", "b@email.com"],
        ]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();
        assert_eq!(report.biggest_customer.customer_name, "First");
    }

    #[test]
    fn test_total_rounded_once() {
        let orders = orders(vec![
            vec!["1", "101", "1", "3", "0.333", "d"],
            vec!["2", "101", "1", "3", "0.333", "d"],
        ]);
        let customers = customers(vec![]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        // 0.999 + 0.999 = 1.998
        assert_eq!(report.total_sales, Money::from_cents(200));
    }

    #[test]
    fn test_report_amounts_round_exact_binary_value() {
        let orders = orders(vec![
            vec!["1", "101", "1", "1", "1.115", "d"],
            vec!["2", "102", "2", "1", "0.125", "d"],
        ]);
        let customers = customers(vec![vec!["101", "Ana", "a@email.com"]]);

        let report = compute_daily_report(&orders, &customers, date()).unwrap();

        assert_eq!(report.biggest_customer.total_spent.cents(), 111);
        assert_eq!(report.top_5_products[0].total_sale.cents(), 111);
        assert_eq!(report.top_5_products[1].total_sale.cents(), 12);
    }

    #[test]
    fn test_single_line_total_rounds_like_float_round() {
        for (price, cents) in [("1.115", 111), ("0.125", 12), ("2.675", 267)] {
            let table = orders(vec![vec!["1", "101", "1", "1", price, "d"]]);
            let records = OrderRecord::from_table(&table).unwrap();
            assert_eq!(aggregate(&records, &[], date()).total_sales.cents(), cents, "{price}");
        }
    }

    #[test]
    fn test_same_input_same_report() {
        let orders = orders(vec![
            vec!["1", "101", "1", "2", "10.0", "d"],
            vec!["2", "102", "2", "1", "15.0", "d"],
        ]);
        let customers = customers(vec![vec!["101", "Ana", "a@email.com"]]);

        let first = compute_daily_report(&orders, &customers, date()).unwrap();
        let second = compute_daily_report(&orders, &customers, date()).unwrap();
        assert_eq!(first, second);
    }
}
