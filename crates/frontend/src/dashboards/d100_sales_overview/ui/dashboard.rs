use std::collections::HashSet;

use contracts::dashboards::d100_sales_overview::{
    SalesOverviewMeta, SalesOverviewRequest, SalesOverviewResponse,
};
use contracts::shared::indicators::{format_value, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::charts::ChartView;
use crate::dashboards::d100_sales_overview::api;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::stat_card::StatCard;
use crate::shared::page_frame::PageFrame;

/// Sales Overview Dashboard: filter panel, 4 KPI tiles, 8 charts in a
/// 2-column grid. Every filter change re-runs the whole
/// filter → aggregate → chart pipeline and swaps the view atomically.
#[component]
pub fn SalesOverviewDashboard() -> impl IntoView {
    let meta = RwSignal::new(None::<SalesOverviewMeta>);
    let selected_locations: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let selected_categories: RwSignal<HashSet<String>> = RwSignal::new(HashSet::new());
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());

    // Data state
    let data = RwSignal::new(None::<SalesOverviewResponse>);
    let loading = RwSignal::new(false);
    let error_msg = RwSignal::new(None::<String>);

    // Load the observed domain on mount; defaults are "everything selected,
    // full observed span" so the first render shows the whole table.
    spawn_local(async move {
        match api::get_meta().await {
            Ok(m) => {
                selected_locations.set(m.locations.iter().cloned().collect());
                selected_categories.set(m.categories.iter().cloned().collect());
                date_from.set(m.date_from.clone().unwrap_or_default());
                date_to.set(m.date_to.clone().unwrap_or_default());
                meta.set(Some(m));
            }
            Err(e) => {
                error_msg.set(Some(e));
            }
        }
    });

    // Recompute the dashboard for the current filter state
    let load_overview = move || {
        if meta.get().is_none() {
            return;
        }

        let mut locations: Vec<String> = selected_locations.get().into_iter().collect();
        let mut categories: Vec<String> = selected_categories.get().into_iter().collect();
        locations.sort();
        categories.sort();
        let from = date_from.get();
        let to = date_to.get();

        loading.set(true);
        error_msg.set(None);

        spawn_local(async move {
            let request = SalesOverviewRequest {
                locations,
                categories,
                date_from: (!from.is_empty()).then_some(from),
                date_to: (!to.is_empty()).then_some(to),
            };

            match api::compute(&request).await {
                Ok(response) => {
                    data.set(Some(response));
                }
                Err(e) => {
                    error_msg.set(Some(e));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        let _ = meta.get();
        let _ = selected_locations.get();
        let _ = selected_categories.get();
        let _ = date_from.get();
        let _ = date_to.get();
        load_overview();
    });

    let on_date_change = Callback::new(move |(from, to): (String, String)| {
        date_from.set(from);
        date_to.set(to);
    });

    let full_span = Signal::derive(move || {
        meta.get()
            .map(|m| {
                (
                    m.date_from.unwrap_or_default(),
                    m.date_to.unwrap_or_default(),
                )
            })
            .unwrap_or_default()
    });

    let select_all_locations = move |_| {
        if let Some(m) = meta.get_untracked() {
            selected_locations.set(m.locations.into_iter().collect());
        }
    };
    let clear_locations = move |_| selected_locations.set(HashSet::new());
    let select_all_categories = move |_| {
        if let Some(m) = meta.get_untracked() {
            selected_categories.set(m.categories.into_iter().collect());
        }
    };
    let clear_categories = move |_| selected_categories.set(HashSet::new());

    // KPI signals
    let kpis = Signal::derive(move || data.get().map(|d| d.kpis));
    let total_revenue = Signal::derive(move || kpis.get().map(|k| k.total_revenue));
    let total_orders = Signal::derive(move || kpis.get().map(|k| k.total_orders as f64));
    let average_order_value = Signal::derive(move || kpis.get().map(|k| k.average_order_value));
    let top_location_text = Signal::derive(move || {
        kpis.get()
            .map(|k| k.top_location.unwrap_or_else(|| "\u{2014}".to_string()))
    });
    let top_location_subtitle = Signal::derive(move || {
        kpis.get().and_then(|k| {
            k.top_location.as_ref()?;
            Some(format_value(k.top_location_revenue, &ValueFormat::usd()))
        })
    });

    view! {
        <PageFrame page_id="d100_sales_overview--dashboard" category="dashboard">
            <div class="page__header">
                <h2 class="page__title">"\u{2615} Coffee Shop Sales Dashboard"</h2>
            </div>

            <div class="sales-overview__filters">
                <DateRangePicker
                    date_from=Signal::derive(move || date_from.get())
                    date_to=Signal::derive(move || date_to.get())
                    on_change=on_date_change
                    full_span=full_span
                    label="Date Range".to_string()
                />

                <div class="sales-overview__facet">
                    <div class="sales-overview__facet-header">
                        <Label>"Locations"</Label>
                        <ButtonGroup>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=select_all_locations
                            >
                                "All"
                            </Button>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=clear_locations
                            >
                                "None"
                            </Button>
                        </ButtonGroup>
                    </div>
                    <CheckboxGroup value=selected_locations>
                        <div class="sales-overview__facet-options">
                            {move || meta.get().map(|m| m.locations).unwrap_or_default()
                                .into_iter()
                                .map(|location| {
                                    view! {
                                        <Checkbox value=location.clone() label=location />
                                    }
                                })
                                .collect_view()}
                        </div>
                    </CheckboxGroup>
                </div>

                <div class="sales-overview__facet">
                    <div class="sales-overview__facet-header">
                        <Label>"Categories"</Label>
                        <ButtonGroup>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=select_all_categories
                            >
                                "All"
                            </Button>
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=clear_categories
                            >
                                "None"
                            </Button>
                        </ButtonGroup>
                    </div>
                    <CheckboxGroup value=selected_categories>
                        <div class="sales-overview__facet-options">
                            {move || meta.get().map(|m| m.categories).unwrap_or_default()
                                .into_iter()
                                .map(|category| {
                                    view! {
                                        <Checkbox value=category.clone() label=category />
                                    }
                                })
                                .collect_view()}
                        </div>
                    </CheckboxGroup>
                </div>
            </div>

            {move || error_msg.get().map(|msg| view! {
                <div class="alert alert--error">
                    <strong>"\u{26a0} Error: "</strong>
                    {msg}
                </div>
            })}

            {move || {
                if loading.get() && data.get().is_none() {
                    Some(view! {
                        <div class="sales-overview__loading">
                            "Loading dashboard..."
                        </div>
                    }.into_any())
                } else {
                    None
                }
            }}

            <div class="sales-overview__kpis">
                <StatCard
                    label="Total Revenue".to_string()
                    icon_name="revenue".to_string()
                    value=total_revenue
                    format=ValueFormat::usd()
                />
                <StatCard
                    label="Total Orders".to_string()
                    icon_name="orders".to_string()
                    value=total_orders
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="Average Order Value".to_string()
                    icon_name="average".to_string()
                    value=average_order_value
                    format=ValueFormat::usd()
                />
                <StatCard
                    label="Top Location".to_string()
                    icon_name="location".to_string()
                    value=Signal::derive(|| None::<f64>)
                    format=ValueFormat::usd()
                    text=top_location_text
                    subtitle=top_location_subtitle
                />
            </div>

            <div class="sales-overview__grid">
                {move || data.get().map(|d| {
                    d.charts
                        .into_iter()
                        .map(|spec| view! { <ChartView spec=spec /> })
                        .collect_view()
                })}
            </div>
        </PageFrame>
    }
}
