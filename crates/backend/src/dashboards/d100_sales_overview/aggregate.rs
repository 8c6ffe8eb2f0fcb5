//! Grouped summaries and KPI computation over a filtered table.
//!
//! All groupings preserve first-encountered order before any explicit sort,
//! never mutate their input, and break value ties lexicographically by label
//! so results are deterministic across runs.

use std::collections::{HashMap, HashSet};

use contracts::dashboards::d100_sales_overview::KpiSummary;
use contracts::domain::transaction::Transaction;
use contracts::shared::calendar;

/// Category whose product mix gets its own distribution chart.
pub const COFFEE_CATEGORY: &str = "Coffee";

/// The four headline metrics. Total orders counts distinct identifiers,
/// not rows; the average guards the zero-order case; the top location
/// breaks revenue ties lexicographically.
pub fn kpi_summary(rows: &[&Transaction]) -> KpiSummary {
    let total_revenue: f64 = rows.iter().map(|row| row.sales).sum();

    let order_ids: HashSet<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    let total_orders = order_ids.len() as u64;

    let average_order_value = if total_orders > 0 {
        total_revenue / total_orders as f64
    } else {
        0.0
    };

    let by_location = revenue_by_location(rows);
    let (top_location, top_location_revenue) = match by_location.first() {
        Some((location, revenue)) => (Some(location.clone()), *revenue),
        None => (None, 0.0),
    };

    KpiSummary {
        total_revenue,
        total_orders,
        average_order_value,
        top_location,
        top_location_revenue,
    }
}

/// Revenue per location, descending, ties lexicographic.
pub fn revenue_by_location(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let mut grouped = group_sum(rows, |row| &row.location);
    sort_descending(&mut grouped);
    grouped
}

/// Revenue per month name, reindexed over the canonical January→December
/// sequence restricted to `month_domain` (months observed in the full
/// table), so the axis stays stable while filters change.
pub fn revenue_by_month(
    rows: &[&Transaction],
    month_domain: &HashSet<String>,
) -> Vec<(String, f64)> {
    let values: HashMap<String, f64> = group_sum(rows, |row| &row.month).into_iter().collect();
    calendar::reindexed(&calendar::MONTH_ORDER, month_domain, &values)
}

/// Months with at least one row in the full table.
pub fn month_domain(table: &[Transaction]) -> HashSet<String> {
    table
        .iter()
        .filter(|row| !row.month.is_empty())
        .map(|row| row.month.clone())
        .collect()
}

/// Revenue per product, descending, truncated to the ten best sellers.
pub fn top_products(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let mut grouped = group_sum(rows, |row| &row.product);
    sort_descending(&mut grouped);
    grouped.truncate(10);
    grouped
}

/// Mean sale amount per category, descending.
pub fn avg_order_value_by_category(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let sums = group_sum(rows, |row| &row.category);
    let counts: HashMap<String, f64> =
        group_count(rows, |row| &row.category).into_iter().collect();

    let mut means: Vec<(String, f64)> = sums
        .into_iter()
        .map(|(category, sum)| {
            let count = counts.get(&category).copied().unwrap_or(0.0);
            let mean = if count > 0.0 { sum / count } else { 0.0 };
            (category, mean)
        })
        .collect();
    sort_descending(&mut means);
    means
}

/// Row occurrences per category, descending.
pub fn category_counts(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let mut grouped = group_count(rows, |row| &row.category);
    sort_descending(&mut grouped);
    grouped
}

/// Row counts per hour of day for every observed hour, ascending.
pub fn orders_by_hour(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let mut counts: HashMap<u32, f64> = HashMap::new();
    for row in rows {
        if let Some(hour) = row.hour {
            *counts.entry(hour).or_insert(0.0) += 1.0;
        }
    }

    let mut hours: Vec<u32> = counts.keys().copied().collect();
    hours.sort_unstable();
    hours
        .into_iter()
        .map(|hour| (hour.to_string(), counts[&hour]))
        .collect()
}

/// Row counts reindexed over the canonical Sunday→Saturday sequence; all
/// seven weekdays always present, absent ones with 0.
pub fn orders_by_weekday(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let counts: HashMap<String, f64> =
        group_count(rows, |row| &row.weekday).into_iter().collect();
    calendar::zero_filled(&calendar::WEEKDAY_ORDER, &counts)
}

/// Occurrence counts of products within the Coffee category, descending.
/// Empty when the filtered table has no Coffee rows.
pub fn coffee_product_counts(rows: &[&Transaction]) -> Vec<(String, f64)> {
    let coffee: Vec<&Transaction> = rows
        .iter()
        .copied()
        .filter(|row| row.category == COFFEE_CATEGORY)
        .collect();
    let mut grouped = group_count(&coffee, |row| &row.product);
    sort_descending(&mut grouped);
    grouped
}

// ---------------------------------------------------------------------------
// Grouping primitives
// ---------------------------------------------------------------------------

/// Sum of `sales` per key, in first-encountered key order.
fn group_sum<'a>(
    rows: &[&'a Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> Vec<(String, f64)> {
    accumulate(rows, key, |row| row.sales)
}

/// Row count per key, in first-encountered key order.
fn group_count<'a>(
    rows: &[&'a Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> Vec<(String, f64)> {
    accumulate(rows, key, |_| 1.0)
}

fn accumulate<'a>(
    rows: &[&'a Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
    value: impl Fn(&'a Transaction) -> f64,
) -> Vec<(String, f64)> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for &row in rows {
        let k = key(row);
        match index.get(k) {
            Some(i) => order[*i].1 += value(row),
            None => {
                index.insert(k.to_string(), order.len());
                order.push((k.to_string(), value(row)));
            }
        }
    }
    order
}

fn sort_descending(grouped: &mut [(String, f64)]) {
    grouped.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(
        id: &str,
        location: &str,
        category: &str,
        product: &str,
        sales: f64,
        date: &str,
        hour: u32,
    ) -> Transaction {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        let (month, weekday) = match parsed {
            Some(d) => {
                use chrono::Datelike;
                (
                    calendar::month_name(d.month()).unwrap_or("").to_string(),
                    calendar::weekday_name(d.weekday()).to_string(),
                )
            }
            None => (String::new(), String::new()),
        };
        Transaction {
            id: id.to_string(),
            location: location.to_string(),
            category: category.to_string(),
            product: product.to_string(),
            sales,
            date: date.to_string(),
            time: format!("{:02}:00", hour),
            month,
            weekday,
            hour: Some(hour),
            order_date: parsed.and_then(|d| d.and_hms_opt(hour, 0, 0)),
        }
    }

    fn refs(table: &[Transaction]) -> Vec<&Transaction> {
        table.iter().collect()
    }

    #[test]
    fn test_kpi_summary_two_row_scenario() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.50, "2024-01-05", 8),
            tx("2", "B", "Tea", "Chai", 3.00, "2024-02-10", 9),
        ];
        let kpis = kpi_summary(&refs(&table));
        assert_eq!(kpis.total_revenue, 7.50);
        assert_eq!(kpis.total_orders, 2);
        assert_eq!(kpis.average_order_value, 3.75);
        assert_eq!(kpis.top_location.as_deref(), Some("A"));
        assert_eq!(kpis.top_location_revenue, 4.50);
    }

    #[test]
    fn test_kpi_summary_counts_distinct_orders() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.00, "2024-01-05", 8),
            tx("1", "A", "Bakery", "Scone", 2.00, "2024-01-05", 8),
        ];
        let kpis = kpi_summary(&refs(&table));
        assert_eq!(kpis.total_orders, 1);
        assert_eq!(kpis.total_revenue, 6.00);
        assert_eq!(kpis.average_order_value, 6.00);
    }

    #[test]
    fn test_kpi_summary_empty_table() {
        let kpis = kpi_summary(&[]);
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.total_orders, 0);
        assert_eq!(kpis.average_order_value, 0.0);
        assert_eq!(kpis.top_location, None);
    }

    #[test]
    fn test_top_location_tie_breaks_lexicographically() {
        let table = vec![
            tx("1", "Midtown", "Coffee", "Latte", 5.00, "2024-01-05", 8),
            tx("2", "Astoria", "Coffee", "Mocha", 5.00, "2024-01-06", 9),
        ];
        let kpis = kpi_summary(&refs(&table));
        assert_eq!(kpis.top_location.as_deref(), Some("Astoria"));
    }

    #[test]
    fn test_revenue_by_month_zero_fills_observed_domain() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.50, "2024-01-05", 8),
            tx("2", "B", "Tea", "Chai", 3.00, "2024-02-10", 9),
        ];
        let domain = month_domain(&table);

        // Only row 2 survives a location filter, but January stays on the axis.
        let filtered: Vec<&Transaction> =
            table.iter().filter(|row| row.location == "B").collect();
        let monthly = revenue_by_month(&filtered, &domain);
        assert_eq!(
            monthly,
            vec![
                ("January".to_string(), 0.0),
                ("February".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn test_top_products_truncates_to_ten_sorted() {
        let mut table = Vec::new();
        for i in 0..12 {
            table.push(tx(
                &i.to_string(),
                "A",
                "Coffee",
                &format!("Product{:02}", i),
                f64::from(i),
                "2024-01-05",
                8,
            ));
        }
        let top = top_products(&refs(&table));
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].0, "Product11");
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_avg_order_value_by_category_is_row_mean() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.00, "2024-01-05", 8),
            tx("2", "A", "Coffee", "Mocha", 6.00, "2024-01-05", 9),
            tx("3", "A", "Tea", "Chai", 3.00, "2024-01-05", 10),
        ];
        let means = avg_order_value_by_category(&refs(&table));
        assert_eq!(means[0], ("Coffee".to_string(), 5.0));
        assert_eq!(means[1], ("Tea".to_string(), 3.0));
    }

    #[test]
    fn test_orders_by_hour_ascending_observed_only() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.00, "2024-01-05", 14),
            tx("2", "A", "Coffee", "Mocha", 5.00, "2024-01-05", 8),
            tx("3", "A", "Coffee", "Latte", 4.00, "2024-01-05", 8),
        ];
        let hourly = orders_by_hour(&refs(&table));
        assert_eq!(
            hourly,
            vec![("8".to_string(), 2.0), ("14".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_orders_by_weekday_always_seven_labels() {
        let table = vec![tx("1", "A", "Coffee", "Latte", 4.00, "2024-01-05", 8)];
        let weekdays = orders_by_weekday(&refs(&table));
        assert_eq!(weekdays.len(), 7);
        assert_eq!(weekdays[0].0, "Sunday");
        assert_eq!(weekdays[6].0, "Saturday");
        // 2024-01-05 was a Friday
        assert_eq!(weekdays[5], ("Friday".to_string(), 1.0));
        assert_eq!(weekdays.iter().map(|(_, v)| v).sum::<f64>(), 1.0);
    }

    #[test]
    fn test_coffee_product_counts_only_coffee_rows() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.00, "2024-01-05", 8),
            tx("2", "A", "Coffee", "Latte", 4.00, "2024-01-05", 9),
            tx("3", "A", "Coffee", "Mocha", 5.00, "2024-01-05", 9),
            tx("4", "A", "Tea", "Chai", 3.00, "2024-01-05", 10),
        ];
        let coffee = coffee_product_counts(&refs(&table));
        assert_eq!(
            coffee,
            vec![("Latte".to_string(), 2.0), ("Mocha".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_coffee_product_counts_empty_without_coffee() {
        let table = vec![tx("1", "B", "Tea", "Chai", 3.00, "2024-01-05", 9)];
        assert!(coffee_product_counts(&refs(&table)).is_empty());
    }

    #[test]
    fn test_aov_times_orders_approximates_revenue() {
        let table = vec![
            tx("1", "A", "Coffee", "Latte", 4.10, "2024-01-05", 8),
            tx("2", "A", "Coffee", "Mocha", 5.35, "2024-01-06", 9),
            tx("3", "B", "Tea", "Chai", 2.80, "2024-01-07", 10),
        ];
        let kpis = kpi_summary(&refs(&table));
        let reconstructed = kpis.average_order_value * kpis.total_orders as f64;
        assert!((reconstructed - kpis.total_revenue).abs() < 1e-9);
    }
}
