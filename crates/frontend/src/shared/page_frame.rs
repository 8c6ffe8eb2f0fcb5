//! PageFrame — standard root wrapper for a page.
//!
//! Guarantees two metadata attributes on the root DOM element:
//!   - `id`                   — `"{entity}--{category}"`, e.g. `"d100_sales_overview--dashboard"`
//!   - `data-page-category` — the page category ("dashboard" for this app)

use leptos::prelude::*;

/// Root wrapper that sets standard metadata on the page element.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    /// Page category, used for DOM inspection.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class="page page--dashboard" data-page-category=category>
            {children()}
        </div>
    }
}
