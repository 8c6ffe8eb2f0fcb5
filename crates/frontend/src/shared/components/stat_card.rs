use crate::shared::icons::icon;
use contracts::shared::indicators::{format_value, ValueFormat};
use leptos::prelude::*;

/// KPI tile: icon, label, one formatted value, optional subtitle.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: String,
    /// Icon name from the icon() helper
    icon_name: String,
    /// Primary numeric value (None = loading / no data)
    #[prop(into)]
    value: Signal<Option<f64>>,
    /// How to format the value
    format: ValueFormat,
    /// Optional text that replaces the numeric value (e.g. a location name)
    #[prop(optional, into)]
    text: MaybeProp<String>,
    /// Optional subtitle below the value
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
) -> impl IntoView {
    let formatted = move || {
        if let Some(t) = text.get() {
            return t;
        }
        match value.get() {
            Some(v) => format_value(v, &format),
            None => "\u{2014}".to_string(),
        }
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">
                {icon(&icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
