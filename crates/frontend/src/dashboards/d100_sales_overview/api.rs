use contracts::dashboards::d100_sales_overview::{
    SalesOverviewMeta, SalesOverviewRequest, SalesOverviewResponse,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Fetch the observed filter domain (all locations/categories, full span).
pub async fn get_meta() -> Result<SalesOverviewMeta, String> {
    let response = Request::get(&api_url("/api/d100/meta"))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: SalesOverviewMeta = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data)
}

/// Run the dashboard pipeline for a filter selection.
pub async fn compute(request: &SalesOverviewRequest) -> Result<SalesOverviewResponse, String> {
    let body = serde_json::to_string(request).map_err(|e| format!("Serialize error: {}", e))?;

    let response = Request::post(&api_url("/api/d100/compute"))
        .header("Content-Type", "application/json")
        .body(body)
        .map_err(|e| format!("Request failed: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: SalesOverviewResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data)
}
