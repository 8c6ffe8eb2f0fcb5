//! Inline-SVG renderers for the dashboard charts.
//!
//! Each renderer draws exactly the points of its `ChartSpec`, in the order
//! they arrive; no reordering and no computation beyond pixel mapping.

use std::f64::consts::{PI, TAU};

use contracts::dashboards::d100_sales_overview::{ChartKind, ChartSpec};
use contracts::shared::indicators::{format_compact, format_value};
use leptos::prelude::*;

/// Categorical palette, assigned by point index.
const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

const VIEW_W: f64 = 560.0;
const VIEW_H: f64 = 320.0;

fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One chart card: title plus the SVG body for the spec's kind.
#[component]
pub fn ChartView(spec: ChartSpec) -> impl IntoView {
    let body = if spec.points.is_empty() {
        empty_note()
    } else {
        match spec.kind {
            ChartKind::Bar => bar_chart(&spec),
            ChartKind::BarHorizontal => hbar_chart(&spec),
            ChartKind::Donut => donut_chart(&spec),
            ChartKind::Line => line_chart(&spec),
        }
    };

    view! {
        <div class="chart-card" data-chart-id=spec.id.clone()>
            <div class="chart-card__title">{spec.title.clone()}</div>
            {body}
        </div>
    }
}

fn empty_note() -> AnyView {
    view! {
        <div class="chart-card__empty">"No data for the current filters"</div>
    }
    .into_any()
}

fn bar_chart(spec: &ChartSpec) -> AnyView {
    const ML: f64 = 52.0;
    const MR: f64 = 16.0;
    const MT: f64 = 12.0;
    const MB: f64 = 44.0;
    let plot_w = VIEW_W - ML - MR;
    let plot_h = VIEW_H - MT - MB;

    let max = nice_max(max_value(spec));
    let n = spec.points.len();
    let step = plot_w / n as f64;
    let bar_w = (step * 0.7).min(64.0);
    let label_every = label_stride(n);

    let grid = y_ticks(max)
        .into_iter()
        .map(|tick| {
            let y = MT + plot_h - tick / max * plot_h;
            view! {
                <g>
                    <line x1=fmt(ML) y1=fmt(y) x2=fmt(VIEW_W - MR) y2=fmt(y) class="chart__grid-line"/>
                    <text x=fmt(ML - 6.0) y=fmt(y + 3.0) text-anchor="end" class="chart__tick">
                        {format_compact(tick)}
                    </text>
                </g>
            }
        })
        .collect_view();

    let bars = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let h = if max > 0.0 {
                point.value / max * plot_h
            } else {
                0.0
            };
            let x = ML + step * i as f64 + (step - bar_w) / 2.0;
            let y = MT + plot_h - h;
            let label = (i % label_every == 0).then(|| {
                let lx = ML + step * i as f64 + step / 2.0;
                view! {
                    <text x=fmt(lx) y=fmt(VIEW_H - MB + 16.0) text-anchor="middle" class="chart__tick">
                        {short_label(&point.label, 9)}
                    </text>
                }
            });
            view! {
                <g>
                    <rect x=fmt(x) y=fmt(y) width=fmt(bar_w) height=fmt(h) rx="2" fill=color_for(i)/>
                    {label}
                </g>
            }
        })
        .collect_view();

    view! {
        <svg viewBox=format!("0 0 {} {}", VIEW_W, VIEW_H) class="chart-card__svg" role="img">
            {grid}
            {bars}
        </svg>
    }
    .into_any()
}

fn hbar_chart(spec: &ChartSpec) -> AnyView {
    const ML: f64 = 132.0;
    const MR: f64 = 76.0;
    const MT: f64 = 10.0;
    const MB: f64 = 10.0;
    let plot_w = VIEW_W - ML - MR;
    let plot_h = VIEW_H - MT - MB;

    let max = nice_max(max_value(spec));
    let n = spec.points.len();
    let row_h = (plot_h / n as f64).min(44.0);
    let bar_h = row_h * 0.65;

    let rows = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let w = if max > 0.0 {
                point.value / max * plot_w
            } else {
                0.0
            };
            let y = MT + row_h * i as f64 + (row_h - bar_h) / 2.0;
            let text_y = y + bar_h / 2.0 + 3.5;
            view! {
                <g>
                    <text x=fmt(ML - 8.0) y=fmt(text_y) text-anchor="end" class="chart__tick">
                        {short_label(&point.label, 18)}
                    </text>
                    <rect x=fmt(ML) y=fmt(y) width=fmt(w) height=fmt(bar_h) rx="2" fill=color_for(i)/>
                    <text x=fmt(ML + w + 6.0) y=fmt(text_y) class="chart__value">
                        {format_value(point.value, &spec.value_format)}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <svg viewBox=format!("0 0 {} {}", VIEW_W, VIEW_H) class="chart-card__svg" role="img">
            {rows}
        </svg>
    }
    .into_any()
}

fn donut_chart(spec: &ChartSpec) -> AnyView {
    let total: f64 = spec.points.iter().map(|p| p.value).sum();
    if total <= 0.0 {
        return empty_note();
    }

    let cx = 150.0;
    let cy = VIEW_H / 2.0;
    let r_outer = 118.0;
    let r_inner = 70.0;

    let mut angle = -PI / 2.0;
    let slices = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let fraction = point.value / total;
            let start = angle;
            let end = start + fraction * TAU;
            angle = end;

            if fraction >= 0.999 {
                // A single full slice: an arc with coincident endpoints
                // renders as nothing, so draw the whole ring instead.
                let r_mid = (r_outer + r_inner) / 2.0;
                let width = r_outer - r_inner;
                view! {
                    <circle
                        cx=fmt(cx)
                        cy=fmt(cy)
                        r=fmt(r_mid)
                        fill="none"
                        stroke=color_for(i)
                        stroke-width=fmt(width)
                    />
                }
                .into_any()
            } else {
                view! {
                    <path d=annulus_sector_path(cx, cy, r_outer, r_inner, start, end) fill=color_for(i)/>
                }
                .into_any()
            }
        })
        .collect_view();

    // Legend on the right; long tails collapse into a "+N more" line
    const LEGEND_ROWS: usize = 11;
    let shown = spec.points.len().min(LEGEND_ROWS);
    let legend = spec.points[..shown]
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let y = 34.0 + 24.0 * i as f64;
            let percent = point.value / total * 100.0;
            view! {
                <g>
                    <rect x="292" y=fmt(y - 9.0) width="10" height="10" rx="2" fill=color_for(i)/>
                    <text x="308" y=fmt(y) class="chart__tick">
                        {format!(
                            "{} \u{2014} {:.1}% ({})",
                            short_label(&point.label, 16),
                            percent,
                            format_value(point.value, &spec.value_format),
                        )}
                    </text>
                </g>
            }
        })
        .collect_view();

    let overflow = (spec.points.len() > LEGEND_ROWS).then(|| {
        let y = 34.0 + 24.0 * shown as f64;
        view! {
            <text x="308" y=fmt(y) class="chart__tick">
                {format!("+{} more", spec.points.len() - LEGEND_ROWS)}
            </text>
        }
    });

    view! {
        <svg viewBox=format!("0 0 {} {}", VIEW_W, VIEW_H) class="chart-card__svg" role="img">
            {slices}
            {legend}
            {overflow}
        </svg>
    }
    .into_any()
}

fn line_chart(spec: &ChartSpec) -> AnyView {
    const ML: f64 = 52.0;
    const MR: f64 = 16.0;
    const MT: f64 = 12.0;
    const MB: f64 = 44.0;
    let plot_w = VIEW_W - ML - MR;
    let plot_h = VIEW_H - MT - MB;

    let max = nice_max(max_value(spec));
    let n = spec.points.len();
    let step = plot_w / n as f64;
    let label_every = label_stride(n);

    let position = |i: usize, value: f64| -> (f64, f64) {
        let x = ML + step * (i as f64 + 0.5);
        let y = MT + plot_h - if max > 0.0 { value / max * plot_h } else { 0.0 };
        (x, y)
    };

    let grid = y_ticks(max)
        .into_iter()
        .map(|tick| {
            let y = MT + plot_h - tick / max * plot_h;
            view! {
                <g>
                    <line x1=fmt(ML) y1=fmt(y) x2=fmt(VIEW_W - MR) y2=fmt(y) class="chart__grid-line"/>
                    <text x=fmt(ML - 6.0) y=fmt(y + 3.0) text-anchor="end" class="chart__tick">
                        {format_compact(tick)}
                    </text>
                </g>
            }
        })
        .collect_view();

    let path_points = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let (x, y) = position(i, point.value);
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let markers = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let (x, y) = position(i, point.value);
            let label = (i % label_every == 0).then(|| {
                view! {
                    <text x=fmt(x) y=fmt(VIEW_H - MB + 16.0) text-anchor="middle" class="chart__tick">
                        {short_label(&point.label, 9)}
                    </text>
                }
            });
            view! {
                <g>
                    <circle cx=fmt(x) cy=fmt(y) r="3.5" fill=PALETTE[0]/>
                    {label}
                </g>
            }
        })
        .collect_view();

    view! {
        <svg viewBox=format!("0 0 {} {}", VIEW_W, VIEW_H) class="chart-card__svg" role="img">
            {grid}
            <polyline points=path_points fill="none" stroke=PALETTE[0] stroke-width="2"/>
            {markers}
        </svg>
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Pixel-mapping helpers
// ---------------------------------------------------------------------------

fn fmt(v: f64) -> String {
    format!("{:.1}", v)
}

fn max_value(spec: &ChartSpec) -> f64 {
    spec.points.iter().map(|p| p.value).fold(0.0_f64, f64::max)
}

/// Round up to 1/2/5 x 10^k so axis ticks land on round numbers.
/// Non-positive input maps to 1.0 so empty scales still render a frame.
fn nice_max(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(max.log10().floor());
    let scaled = max / magnitude;
    let nice = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn y_ticks(nice: f64) -> Vec<f64> {
    (0..=4).map(|i| nice * f64::from(i) / 4.0).collect()
}

/// Drop every other axis label when the axis gets crowded.
fn label_stride(n: usize) -> usize {
    if n > 12 {
        2
    } else {
        1
    }
}

fn short_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let truncated: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}\u{2026}", truncated)
}

fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// SVG path for one donut slice: outer arc clockwise, inner arc back.
fn annulus_sector_path(
    cx: f64,
    cy: f64,
    r_outer: f64,
    r_inner: f64,
    start: f64,
    end: f64,
) -> String {
    let (x0, y0) = polar(cx, cy, r_outer, start);
    let (x1, y1) = polar(cx, cy, r_outer, end);
    let (xi1, yi1) = polar(cx, cy, r_inner, end);
    let (xi0, yi0) = polar(cx, cy, r_inner, start);
    let large = if end - start > PI { 1 } else { 0 };
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z",
        x0, y0, r_outer, r_outer, large, x1, y1, xi1, yi1, r_inner, r_inner, large, xi0, yi0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_max_rounds_to_round_numbers() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(4.5), 5.0);
        assert_eq!(nice_max(7.5), 10.0);
        assert_eq!(nice_max(100.0), 100.0);
        assert_eq!(nice_max(850.0), 1000.0);
        assert_eq!(nice_max(1200.0), 2000.0);
    }

    #[test]
    fn test_y_ticks_span_zero_to_max() {
        let ticks = y_ticks(100.0);
        assert_eq!(ticks, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_short_label_truncates_with_ellipsis() {
        assert_eq!(short_label("Latte", 9), "Latte");
        assert_eq!(short_label("Triple Caramel Macchiato", 9), "Triple C\u{2026}");
    }

    #[test]
    fn test_label_stride() {
        assert_eq!(label_stride(7), 1);
        assert_eq!(label_stride(24), 2);
    }

    #[test]
    fn test_annulus_sector_path_shape() {
        let path = annulus_sector_path(100.0, 100.0, 80.0, 50.0, -PI / 2.0, 0.0);
        // Starts at the top of the outer radius, closes back on itself
        assert!(path.starts_with("M 100.00 20.00"));
        assert!(path.ends_with(" Z"));
        // Quarter turn: both arcs carry the small-arc flag
        assert!(path.contains("A 80.00 80.00 0 0 1"));
        assert!(path.contains("A 50.00 50.00 0 0 0"));
    }
}
