use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One point-of-sale line item as loaded from the transactions file.
///
/// `id` identifies the logical order. An order with several line items
/// repeats the same `id` on several rows, so "order count" metrics must
/// count distinct identifiers rather than rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Order identifier from the source file.
    pub id: String,

    /// Store location (e.g. "Astoria").
    pub location: String,

    /// Product category (e.g. "Coffee").
    pub category: String,

    /// Product name (e.g. "Latte").
    pub product: String,

    /// Sale amount for this line item, non-negative.
    pub sales: f64,

    /// Raw calendar date text as read from the file (YYYY-MM-DD).
    pub date: String,

    /// Raw time-of-day text as read from the file (HH:MM or HH:MM:SS).
    pub time: String,

    /// Month name ("January".."December"); empty when underivable.
    pub month: String,

    /// Weekday name ("Sunday".."Saturday"); empty when underivable.
    pub weekday: String,

    /// Hour of day 0-23; `None` when the time could not be parsed.
    pub hour: Option<u32>,

    /// Combined date+time; `None` when either part fails to parse.
    /// Rows without it are excluded from date-range filtering only.
    #[serde(rename = "orderDate")]
    pub order_date: Option<NaiveDateTime>,
}

impl Transaction {
    /// Calendar date of the combined timestamp, when present.
    pub fn order_day(&self) -> Option<NaiveDate> {
        self.order_date.map(|ts| ts.date())
    }
}
