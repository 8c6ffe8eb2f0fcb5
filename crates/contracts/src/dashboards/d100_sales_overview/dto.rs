use serde::{Deserialize, Serialize};

use crate::shared::indicators::ValueFormat;

// ---------------------------------------------------------------------------
// Filter request & observed domain
// ---------------------------------------------------------------------------

/// Filter state sent by the dashboard on every recompute.
///
/// Both categorical selections are explicit and membership is strict: an
/// empty set selects no rows ("none"), matching multi-select semantics.
/// The "all observed values" default is established by the client from
/// [`SalesOverviewMeta`]. Date bounds are inclusive `YYYY-MM-DD` strings;
/// when both are absent the date predicate is bypassed entirely, which is
/// the only way rows without a derived timestamp can pass it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverviewRequest {
    pub locations: Vec<String>,
    pub categories: Vec<String>,
    #[serde(default, rename = "dateFrom")]
    pub date_from: Option<String>,
    #[serde(default, rename = "dateTo")]
    pub date_to: Option<String>,
}

/// Observed filter domain of the loaded table, used to initialise the
/// filter controls (all values selected, full observed date span).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverviewMeta {
    /// Distinct locations in first-encountered order.
    pub locations: Vec<String>,
    /// Distinct categories in first-encountered order.
    pub categories: Vec<String>,
    /// Earliest observed order date (YYYY-MM-DD), `None` when no row has a
    /// parseable timestamp.
    #[serde(rename = "dateFrom")]
    pub date_from: Option<String>,
    /// Latest observed order date (YYYY-MM-DD).
    #[serde(rename = "dateTo")]
    pub date_to: Option<String>,
    /// Total rows in the loaded table.
    #[serde(rename = "rowCount")]
    pub row_count: usize,
}

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// The four headline metrics of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Sum of `sales` over the filtered rows.
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    /// Count of distinct order identifiers, not rows.
    #[serde(rename = "totalOrders")]
    pub total_orders: u64,
    /// `total_revenue / total_orders`, exactly 0.0 when there are no orders.
    #[serde(rename = "averageOrderValue")]
    pub average_order_value: f64,
    /// Location with the highest summed revenue; ties break
    /// lexicographically by name. `None` when the filtered table is empty.
    #[serde(rename = "topLocation")]
    pub top_location: Option<String>,
    #[serde(rename = "topLocationRevenue")]
    pub top_location_revenue: f64,
}

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

/// Renderable chart family. The frontend dispatches on this, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    BarHorizontal,
    Donut,
    Line,
}

/// One category/value pair of a chart dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A fully shaped chart description.
///
/// `points` arrive already ordered for rendering; the frontend must not
/// reorder or recompute them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Stable identifier, e.g. "monthly_revenue".
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    #[serde(rename = "xLabel")]
    pub x_label: String,
    #[serde(rename = "yLabel")]
    pub y_label: String,
    /// How point values are formatted on axes and legends.
    #[serde(rename = "valueFormat")]
    pub value_format: ValueFormat,
    pub points: Vec<ChartPoint>,
}

// ---------------------------------------------------------------------------
// API response
// ---------------------------------------------------------------------------

/// One consistent snapshot of the dashboard for a filter selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOverviewResponse {
    pub kpis: KpiSummary,
    pub charts: Vec<ChartSpec>,
}
