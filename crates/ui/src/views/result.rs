use dioxus::prelude::*;

use super::chart::PieChart;
use crate::vm::{CalculatorIntent, ResultVm};

#[component]
pub fn ResultSection(
    result: ResultVm,
    exporting: bool,
    saving: bool,
    on_intent: Callback<CalculatorIntent>,
) -> Element {
    let export_label = if exporting { "Exporting..." } else { "Export PDF" };

    rsx! {
        section { id: "result-section", class: "result",
            h2 { "Your result" }
            p { class: "result__total",
                "Your estimated footprint is "
                strong { "{result.total}" }
                " kg of CO₂ per month."
            }
            p { class: result.feedback_class, "{result.feedback}" }

            if !result.tips.is_empty() {
                div { class: "result__tips",
                    h3 { "Sustainability tips" }
                    ul {
                        for tip in result.tips.iter() {
                            li { key: "{tip}", "{tip}" }
                        }
                    }
                }
            }

            if !result.history.is_empty() {
                div { class: "result__history",
                    h3 { "Result history" }
                    ul {
                        for (index, row) in result.history.iter().enumerate() {
                            li { key: "{index}", "{row.label}" }
                        }
                    }
                }
            }

            PieChart { chart: result.chart.clone() }

            div { class: "result__actions",
                button {
                    id: "start-over",
                    class: "btn btn--secondary",
                    r#type: "button",
                    disabled: saving,
                    onclick: move |_| on_intent.call(CalculatorIntent::Reset),
                    "Start over"
                }
                button {
                    id: "export-pdf",
                    class: "btn btn--primary",
                    r#type: "button",
                    disabled: exporting,
                    onclick: move |_| on_intent.call(CalculatorIntent::Export),
                    "{export_label}"
                }
                button {
                    id: "delete-history",
                    class: "btn btn--danger",
                    r#type: "button",
                    disabled: saving,
                    onclick: move |_| on_intent.call(CalculatorIntent::ClearHistory),
                    "Delete history"
                }
            }
        }
    }
}
