use leptos::prelude::*;
use thaw::*;

/// DateRangePicker component - two date inputs for an inclusive [from, to]
/// range plus a quick action that resets the range to the full observed
/// span. Styled to match Thaw UI inputs.
#[component]
pub fn DateRangePicker(
    /// "from" date in yyyy-mm-dd format
    #[prop(into)]
    date_from: Signal<String>,

    /// "to" date in yyyy-mm-dd format
    #[prop(into)]
    date_to: Signal<String>,

    /// Callback when the range changes (from, to)
    on_change: Callback<(String, String)>,

    /// Full observed span used by the reset action (from, to)
    #[prop(into)]
    full_span: Signal<(String, String)>,

    /// Optional label for the component
    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let on_from_change = {
        let on_change = on_change.clone();
        move |new_from: String| {
            let current_to = date_to.get_untracked();
            on_change.run((new_from, current_to));
        }
    };

    let on_to_change = {
        let on_change = on_change.clone();
        move |new_to: String| {
            let current_from = date_from.get_untracked();
            on_change.run((current_from, new_to));
        }
    };

    // Reset to the full observed span
    let on_reset = move |_| {
        let (from, to) = full_span.get_untracked();
        on_change.run((from, to));
    };

    view! {
        <style>
            "
            /* Match Thaw Input visuals */
            .date-range-picker {
                box-sizing: border-box;
                border: 1px solid var(--colorNeutralStroke1, #d1d1d1);
                border-radius: var(--borderRadiusMedium, 4px);
                background: var(--colorNeutralBackground1, #fff);
                min-height: 32px;
                height: 32px;
            }

            .date-range-picker input[type=\"date\"] {
                box-sizing: border-box;
                background: transparent;
                border: none;
                border-radius: 0;
                cursor: pointer;
                margin: 4px 0 4px 4px;
                padding: 0 12px;
                font-size: 0.875rem;
                color: var(--colorNeutralForeground1, #242424);
                width: 130px;
            }

            .date-range-picker input[type=\"date\"]:focus {
                outline: none;
            }
            "
        </style>

        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! {
                <Label>{l}</Label>
            })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    prop:value=date_from
                    on:input=move |ev| {
                        on_from_change(event_target_value(&ev));
                    }
                />

                <div>"\u{2014}"</div>

                <input
                    type="date"
                    prop:value=date_to
                    on:input=move |ev| {
                        on_to_change(event_target_value(&ev));
                    }
                />

                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=on_reset
                >
                    "Full range"
                </Button>
            </Flex>
        </Flex>
    }
}
