use axum::{http::StatusCode, Json};
use contracts::dashboards::d100_sales_overview::{
    SalesOverviewMeta, SalesOverviewRequest, SalesOverviewResponse,
};

use crate::dashboards::d100_sales_overview::service;

/// GET /api/d100/meta
pub async fn get_meta() -> Result<Json<SalesOverviewMeta>, StatusCode> {
    match service::get_meta() {
        Ok(meta) => {
            tracing::info!(
                "D100 Dashboard: meta with {} locations, {} categories, {} rows",
                meta.locations.len(),
                meta.categories.len(),
                meta.row_count
            );
            Ok(Json(meta))
        }
        Err(e) => {
            tracing::error!("D100 Dashboard: failed to get meta: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/d100/compute
pub async fn compute(
    Json(request): Json<SalesOverviewRequest>,
) -> Result<Json<SalesOverviewResponse>, StatusCode> {
    tracing::info!(
        "D100 Dashboard: compute for {} locations, {} categories, range {:?}..{:?}",
        request.locations.len(),
        request.categories.len(),
        request.date_from,
        request.date_to
    );

    match service::compute_overview(&request) {
        Ok(response) => {
            tracing::info!(
                "D100 Dashboard: returning {} orders across {} charts",
                response.kpis.total_orders,
                response.charts.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D100 Dashboard: failed to compute overview: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
