//! Shapes aggregate outputs into renderable chart specifications.
//!
//! Nothing here computes: every point value is copied verbatim from the
//! aggregator, and the fixed chart order matches the dashboard grid
//! (2 columns x 4 rows, left to right, top to bottom).

use contracts::dashboards::d100_sales_overview::{ChartKind, ChartPoint, ChartSpec};
use contracts::domain::transaction::Transaction;
use contracts::shared::indicators::ValueFormat;

use super::aggregate;

/// Build the eight dashboard charts for a filtered table. The full table is
/// needed alongside so the month axis can keep every observed month even
/// when the filter empties it.
pub fn build_charts(filtered: &[&Transaction], table: &[Transaction]) -> Vec<ChartSpec> {
    let month_domain = aggregate::month_domain(table);

    vec![
        spec(
            "monthly_revenue",
            ChartKind::Bar,
            "Sales by Month",
            "Month",
            "Revenue",
            ValueFormat::usd(),
            aggregate::revenue_by_month(filtered, &month_domain),
        ),
        spec(
            "location_share",
            ChartKind::Donut,
            "Sales by Location",
            "Location",
            "Revenue",
            ValueFormat::usd(),
            aggregate::revenue_by_location(filtered),
        ),
        spec(
            "top_products",
            ChartKind::BarHorizontal,
            "Top 10 Products",
            "Revenue",
            "Product",
            ValueFormat::usd(),
            aggregate::top_products(filtered),
        ),
        spec(
            "category_aov",
            ChartKind::BarHorizontal,
            "Avg Order Value by Category",
            "Avg Order Value",
            "Category",
            ValueFormat::usd(),
            aggregate::avg_order_value_by_category(filtered),
        ),
        spec(
            "category_popularity",
            ChartKind::BarHorizontal,
            "Popular Categories",
            "Orders",
            "Category",
            ValueFormat::Integer,
            aggregate::category_counts(filtered),
        ),
        spec(
            "hourly_orders",
            ChartKind::Line,
            "Orders by Hour",
            "Hour",
            "Orders",
            ValueFormat::Integer,
            aggregate::orders_by_hour(filtered),
        ),
        spec(
            "weekday_orders",
            ChartKind::Bar,
            "Orders by Day",
            "Weekday",
            "Orders",
            ValueFormat::Integer,
            aggregate::orders_by_weekday(filtered),
        ),
        spec(
            "coffee_types",
            ChartKind::Donut,
            "Coffee Type Distribution",
            "Product",
            "Orders",
            ValueFormat::Integer,
            aggregate::coffee_product_counts(filtered),
        ),
    ]
}

fn spec(
    id: &str,
    kind: ChartKind,
    title: &str,
    x_label: &str,
    y_label: &str,
    value_format: ValueFormat,
    points: Vec<(String, f64)>,
) -> ChartSpec {
    ChartSpec {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        value_format,
        points: points
            .into_iter()
            .map(|(label, value)| ChartPoint::new(label, value))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: &str, category: &str, product: &str, sales: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        Transaction {
            id: id.to_string(),
            location: "Astoria".to_string(),
            category: category.to_string(),
            product: product.to_string(),
            sales,
            date: "2024-01-05".to_string(),
            time: "08:00".to_string(),
            month: "January".to_string(),
            weekday: "Friday".to_string(),
            hour: Some(8),
            order_date: date.and_hms_opt(8, 0, 0),
        }
    }

    #[test]
    fn test_builds_eight_charts_in_grid_order() {
        let table = vec![tx("1", "Coffee", "Latte", 4.5)];
        let filtered: Vec<&Transaction> = table.iter().collect();
        let charts = build_charts(&filtered, &table);

        let ids: Vec<&str> = charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "monthly_revenue",
                "location_share",
                "top_products",
                "category_aov",
                "category_popularity",
                "hourly_orders",
                "weekday_orders",
                "coffee_types",
            ]
        );
    }

    #[test]
    fn test_chart_kinds_match_layout() {
        let table = vec![tx("1", "Coffee", "Latte", 4.5)];
        let filtered: Vec<&Transaction> = table.iter().collect();
        let charts = build_charts(&filtered, &table);

        assert_eq!(charts[0].kind, ChartKind::Bar);
        assert_eq!(charts[1].kind, ChartKind::Donut);
        assert_eq!(charts[2].kind, ChartKind::BarHorizontal);
        assert_eq!(charts[5].kind, ChartKind::Line);
        assert_eq!(charts[7].kind, ChartKind::Donut);
    }

    #[test]
    fn test_points_pass_through_unaltered() {
        let table = vec![
            tx("1", "Coffee", "Latte", 4.5),
            tx("2", "Coffee", "Latte", 4.5),
            tx("3", "Coffee", "Mocha", 5.0),
        ];
        let filtered: Vec<&Transaction> = table.iter().collect();
        let charts = build_charts(&filtered, &table);

        let top = charts.iter().find(|c| c.id == "top_products").unwrap();
        assert_eq!(top.points[0], ChartPoint::new("Latte", 9.0));
        assert_eq!(top.points[1], ChartPoint::new("Mocha", 5.0));

        let coffee = charts.iter().find(|c| c.id == "coffee_types").unwrap();
        assert_eq!(coffee.points[0], ChartPoint::new("Latte", 2.0));
    }

    #[test]
    fn test_empty_filter_still_yields_eight_charts() {
        let table = vec![tx("1", "Coffee", "Latte", 4.5)];
        let charts = build_charts(&[], &table);
        assert_eq!(charts.len(), 8);
        // Month axis keeps the observed domain with zero values
        assert_eq!(charts[0].points, vec![ChartPoint::new("January", 0.0)]);
        // Weekday axis always has all seven labels
        assert_eq!(charts[6].points.len(), 7);
        assert!(charts[6].points.iter().all(|p| p.value == 0.0));
        // Donuts are simply empty
        assert!(charts[1].points.is_empty());
        assert!(charts[7].points.is_empty());
    }
}
