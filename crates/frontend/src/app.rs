use crate::dashboards::d100_sales_overview::ui::SalesOverviewDashboard;
use leptos::prelude::*;

/// Application root. The sales overview dashboard is the whole app: no
/// routing, no shell, one page.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <SalesOverviewDashboard />
    }
}
