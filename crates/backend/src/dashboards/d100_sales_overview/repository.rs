//! Data access for the sales overview dashboard: parses the transactions
//! CSV once and caches the table for the life of the process.

use std::collections::HashSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime, Timelike};
use contracts::dashboards::d100_sales_overview::SalesOverviewMeta;
use contracts::domain::transaction::Transaction;
use contracts::shared::calendar;
use once_cell::sync::OnceCell;
use thiserror::Error;

/// Columns the transactions file must provide. Header match is
/// case-insensitive; `month`, `weekday` and `hour` are optional and derived
/// from `date`/`time` when absent.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "id", "location", "category", "product", "sales", "date", "time",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read transactions file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse transactions file: {0}")]
    Csv(#[from] csv::Error),
    #[error("transactions file is missing required column \"{0}\"")]
    Schema(String),
}

static TABLE: OnceCell<Vec<Transaction>> = OnceCell::new();

/// Load the transactions file into the process-wide cache. Idempotent:
/// a second call returns the already-cached row count without touching
/// the file again.
pub fn init_table(path: &Path) -> Result<usize, LoadError> {
    if let Some(rows) = TABLE.get() {
        return Ok(rows.len());
    }
    let rows = load_transactions(path)?;
    Ok(TABLE.get_or_init(|| rows).len())
}

/// The cached table, `None` until [`init_table`] has succeeded.
pub fn cached_table() -> Option<&'static [Transaction]> {
    TABLE.get().map(|rows| rows.as_slice())
}

/// Read and parse the transactions file.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_transactions(&text)
}

/// Parse CSV text into transactions.
///
/// Schema problems (missing required column) are fatal. Row-level problems
/// are not: a malformed record or sales amount skips the row with a warning,
/// a malformed date/time only nulls the derived timestamp fields.
pub fn parse_transactions(text: &str) -> Result<Vec<Transaction>, LoadError> {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Option<usize> {
        headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    for name in REQUIRED_COLUMNS {
        if column(name).is_none() {
            return Err(LoadError::Schema(name.to_string()));
        }
    }

    let id_col = column("id").unwrap_or_default();
    let location_col = column("location").unwrap_or_default();
    let category_col = column("category").unwrap_or_default();
    let product_col = column("product").unwrap_or_default();
    let sales_col = column("sales").unwrap_or_default();
    let date_col = column("date").unwrap_or_default();
    let time_col = column("time").unwrap_or_default();
    // Precomputed derived columns, used when present
    let month_col = column("month");
    let weekday_col = column("weekday");
    let hour_col = column("hour");

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record: {}", e);
                skipped += 1;
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let sales_text = field(sales_col);
        let sales = match sales_text.parse::<f64>() {
            Ok(v) if v >= 0.0 => v,
            _ => {
                tracing::warn!("Skipping row with invalid sales amount: {:?}", sales_text);
                skipped += 1;
                continue;
            }
        };

        let date_text = field(date_col);
        let time_text = field(time_col);
        let parsed_date = parse_date(&date_text);
        let parsed_time = parse_time(&time_text);

        let month = non_empty(month_col.map(|c| field(c)))
            .or_else(|| {
                parsed_date.and_then(|d| {
                    use chrono::Datelike;
                    calendar::month_name(d.month()).map(str::to_string)
                })
            })
            .unwrap_or_default();

        let weekday = non_empty(weekday_col.map(|c| field(c)))
            .or_else(|| {
                parsed_date.map(|d| {
                    use chrono::Datelike;
                    calendar::weekday_name(d.weekday()).to_string()
                })
            })
            .unwrap_or_default();

        let hour = non_empty(hour_col.map(|c| field(c)))
            .and_then(|h| h.parse::<u32>().ok())
            .filter(|h| *h < 24)
            .or_else(|| parsed_time.map(|t| t.hour()));

        let order_date = match (parsed_date, parsed_time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        };

        rows.push(Transaction {
            id: field(id_col),
            location: field(location_col),
            category: field(category_col),
            product: field(product_col),
            sales,
            date: date_text,
            time: time_text,
            month,
            weekday,
            hour,
            order_date,
        });
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed rows while loading", skipped);
    }
    tracing::info!("Parsed {} transactions", rows.len());

    Ok(rows)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
        .ok()
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .ok()
}

/// Observed filter domain of a table: distinct locations/categories in
/// first-encountered order plus the min/max order dates.
pub fn observed_meta(table: &[Transaction]) -> SalesOverviewMeta {
    let mut locations = Vec::new();
    let mut categories = Vec::new();
    let mut seen_locations = HashSet::new();
    let mut seen_categories = HashSet::new();

    for row in table {
        if seen_locations.insert(row.location.clone()) {
            locations.push(row.location.clone());
        }
        if seen_categories.insert(row.category.clone()) {
            categories.push(row.category.clone());
        }
    }

    let days: Vec<NaiveDate> = table.iter().filter_map(|row| row.order_day()).collect();
    let date_from = days.iter().min().map(|d| d.format("%Y-%m-%d").to_string());
    let date_to = days.iter().max().map(|d| d.format("%Y-%m-%d").to_string());

    SalesOverviewMeta {
        locations,
        categories,
        date_from,
        date_to,
        row_count: table.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,location,category,product,sales,date,time
1,Astoria,Coffee,Latte,4.50,2024-01-05,08:00
2,Midtown,Tea,Chai,3.00,2024-02-10,09:15
2,Midtown,Bakery,Scone,2.25,2024-02-10,09:15
";

    #[test]
    fn test_parses_rows_and_derives_fields() {
        let rows = parse_transactions(SAMPLE).unwrap();
        assert_eq!(rows.len(), 3);

        let first = &rows[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.location, "Astoria");
        assert_eq!(first.sales, 4.50);
        assert_eq!(first.month, "January");
        assert_eq!(first.weekday, "Friday"); // 2024-01-05 was a Friday
        assert_eq!(first.hour, Some(8));
        assert!(first.order_date.is_some());
    }

    #[test]
    fn test_bom_is_tolerated() {
        let with_bom = format!("\u{FEFF}{}", SAMPLE);
        let rows = parse_transactions(&with_bom).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "1");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let text = "id,location,category,product,sales,date\n1,A,Coffee,Latte,4.5,2024-01-05\n";
        match parse_transactions(text) {
            Err(LoadError::Schema(column)) => assert_eq!(column, "time"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_sales_skips_row() {
        let text = "\
id,location,category,product,sales,date,time
1,Astoria,Coffee,Latte,oops,2024-01-05,08:00
2,Astoria,Coffee,Mocha,5.00,2024-01-05,08:30
";
        let rows = parse_transactions(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product, "Mocha");
    }

    #[test]
    fn test_bad_date_keeps_row_without_timestamp() {
        let text = "\
id,location,category,product,sales,date,time
1,Astoria,Coffee,Latte,4.50,not-a-date,08:00
";
        let rows = parse_transactions(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_date, None);
        assert_eq!(rows[0].month, "");
        // Time still parsed on its own
        assert_eq!(rows[0].hour, Some(8));
    }

    #[test]
    fn test_precomputed_derived_columns_win() {
        let text = "\
id,location,category,product,sales,date,time,month,weekday,hour
1,Astoria,Coffee,Latte,4.50,2024-01-05,08:00,March,Monday,14
";
        let rows = parse_transactions(text).unwrap();
        assert_eq!(rows[0].month, "March");
        assert_eq!(rows[0].weekday, "Monday");
        assert_eq!(rows[0].hour, Some(14));
        // Combined timestamp still derives from the raw date/time columns
        assert!(rows[0].order_date.is_some());
    }

    #[test]
    fn test_observed_meta_first_encounter_order_and_span() {
        let rows = parse_transactions(SAMPLE).unwrap();
        let meta = observed_meta(&rows);
        assert_eq!(meta.locations, vec!["Astoria", "Midtown"]);
        assert_eq!(meta.categories, vec!["Coffee", "Tea", "Bakery"]);
        assert_eq!(meta.date_from.as_deref(), Some("2024-01-05"));
        assert_eq!(meta.date_to.as_deref(), Some("2024-02-10"));
        assert_eq!(meta.row_count, 3);
    }

    #[test]
    fn test_observed_meta_empty_table() {
        let meta = observed_meta(&[]);
        assert!(meta.locations.is_empty());
        assert_eq!(meta.date_from, None);
        assert_eq!(meta.row_count, 0);
    }
}
