use dioxus::prelude::*;

use crate::vm::{CHART_RADIUS, CHART_SIZE, ChartVm};

/// Category breakdown as an SVG pie with a legend.
#[component]
pub fn PieChart(chart: ChartVm) -> Element {
    let view_box = format!("0 0 {CHART_SIZE} {CHART_SIZE}");
    let center = CHART_SIZE / 2.0;

    rsx! {
        div { class: "chart",
            h3 { "Score by category" }
            if chart.is_empty() {
                p { class: "chart__empty", "Nothing to chart: every category scored zero." }
            } else {
                svg {
                    class: "chart__pie",
                    view_box: "{view_box}",
                    width: "220",
                    height: "220",
                    for slice in chart.slices.iter() {
                        if let Some(d) = slice.path.as_ref() {
                            path { key: "{slice.category}", d: "{d}", fill: slice.color }
                        } else if slice.full_circle {
                            circle {
                                key: "{slice.category}",
                                cx: "{center}",
                                cy: "{center}",
                                r: "{CHART_RADIUS}",
                                fill: slice.color,
                            }
                        }
                    }
                }
            }
            ul { class: "chart__legend",
                for slice in chart.slices.iter() {
                    li { key: "{slice.category}", class: "chart__legend-item",
                        span {
                            class: "chart__swatch",
                            style: "background-color: {slice.color}",
                        }
                        span { "{slice.category}: {slice.score} ({slice.percent_label})" }
                    }
                }
            }
        }
    }
}
