//! Canonical calendar sequences and reindex helpers.
//!
//! Grouped month/weekday series are reordered against these fixed sequences
//! so chart axes stay stable across filter changes instead of following
//! incidental grouping order.

use std::collections::{HashMap, HashSet};

use chrono::Weekday;

pub const MONTH_ORDER: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_ORDER: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_ORDER.get(month.checked_sub(1)? as usize).copied()
}

/// Weekday name in the Sunday-first convention used by the dashboard.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_ORDER[weekday.num_days_from_sunday() as usize]
}

/// Every canonical label in order, with 0.0 for labels missing from
/// `values`. Keys of `values` outside the canonical sequence are dropped.
pub fn zero_filled(canonical: &[&str], values: &HashMap<String, f64>) -> Vec<(String, f64)> {
    canonical
        .iter()
        .map(|label| {
            (
                (*label).to_string(),
                values.get(*label).copied().unwrap_or(0.0),
            )
        })
        .collect()
}

/// Canonical labels restricted to `domain`, zero-filling labels present in
/// the domain but missing from `values`.
///
/// The domain is the set of labels observed in the full table, so filtering
/// zero-fills an axis position instead of collapsing it, while labels the
/// dataset never contains stay omitted.
pub fn reindexed(
    canonical: &[&str],
    domain: &HashSet<String>,
    values: &HashMap<String, f64>,
) -> Vec<(String, f64)> {
    canonical
        .iter()
        .filter(|label| domain.contains(**label))
        .map(|label| {
            (
                (*label).to_string(),
                values.get(*label).copied().unwrap_or(0.0),
            )
        })
        .collect()
}
