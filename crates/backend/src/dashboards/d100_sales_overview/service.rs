//! Filter engine and pipeline orchestration for the sales overview
//! dashboard: every request runs filter → aggregate → chart-build over the
//! cached table and returns one consistent snapshot.

use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d100_sales_overview::{
    SalesOverviewMeta, SalesOverviewRequest, SalesOverviewResponse,
};
use contracts::domain::transaction::Transaction;

use super::{aggregate, charts, repository};

/// Observed filter domain of the cached table.
pub fn get_meta() -> Result<SalesOverviewMeta> {
    let table = cached_table()?;
    Ok(repository::observed_meta(table))
}

/// Run the full pipeline over the cached table.
pub fn compute_overview(request: &SalesOverviewRequest) -> Result<SalesOverviewResponse> {
    let table = cached_table()?;
    Ok(compute_for_table(table, request))
}

fn cached_table() -> Result<&'static [Transaction]> {
    repository::cached_table()
        .ok_or_else(|| anyhow::anyhow!("transaction table is not loaded"))
}

/// Pure pipeline over an explicit table.
pub fn compute_for_table(
    table: &[Transaction],
    request: &SalesOverviewRequest,
) -> SalesOverviewResponse {
    let filtered = apply_filter(table, request);
    SalesOverviewResponse {
        kpis: aggregate::kpi_summary(&filtered),
        charts: charts::build_charts(&filtered, table),
    }
}

/// Select the rows matching the filter.
///
/// Membership in both categorical selections is strict, so an empty
/// selection keeps nothing. The date predicate is inclusive on both bounds
/// and is bypassed only when neither bound is given; a row without a
/// derived timestamp can never satisfy a present bound. A non-destructive
/// projection: the table itself is never touched.
pub fn apply_filter<'a>(
    table: &'a [Transaction],
    request: &SalesOverviewRequest,
) -> Vec<&'a Transaction> {
    let locations: HashSet<&str> = request.locations.iter().map(String::as_str).collect();
    let categories: HashSet<&str> = request.categories.iter().map(String::as_str).collect();
    let from = request.date_from.as_deref().and_then(parse_day);
    let to = request.date_to.as_deref().and_then(parse_day);
    let date_bounded = from.is_some() || to.is_some();

    table
        .iter()
        .filter(|row| {
            if !locations.contains(row.location.as_str()) {
                return false;
            }
            if !categories.contains(row.category.as_str()) {
                return false;
            }
            if !date_bounded {
                return true;
            }
            let Some(day) = row.order_day() else {
                return false;
            };
            if let Some(from) = from {
                if day < from {
                    return false;
                }
            }
            if let Some(to) = to {
                if day > to {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn parse_day(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
