use dioxus::prelude::*;

use crate::vm::{CalculatorIntent, FormVm, QuestionVm};

/// One question at a time, with "Next question" or "Calculate" below it.
#[component]
pub fn QuestionnaireSection(
    form: FormVm,
    saving: bool,
    on_intent: Callback<CalculatorIntent>,
) -> Element {
    rsx! {
        div { class: "form-container",
            p { class: "form-progress", "{form.progress_label}" }
            if let Some(question) = form.question.clone() {
                QuestionCard { question, on_intent }
            }
            div { class: "form-actions",
                if form.is_last {
                    button {
                        id: "calculate",
                        class: "btn btn--primary",
                        r#type: "button",
                        disabled: !form.can_submit || saving,
                        onclick: move |_| on_intent.call(CalculatorIntent::Submit),
                        "Calculate"
                    }
                } else {
                    button {
                        id: "next-question",
                        class: "btn btn--secondary",
                        r#type: "button",
                        disabled: !form.can_advance,
                        onclick: move |_| on_intent.call(CalculatorIntent::Next),
                        "Next question"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, on_intent: Callback<CalculatorIntent>) -> Element {
    let question_id = question.id;

    rsx! {
        fieldset { class: "question",
            legend { class: "question__text", "{question.heading}" }
            p { class: "question__category", "{question.category}" }
            for option in question.options.iter().cloned() {
                label { key: "{option.score}", class: "question__option",
                    input {
                        r#type: "radio",
                        name: "{question.input_name}",
                        value: "{option.score}",
                        checked: option.checked,
                        onchange: move |_| {
                            on_intent.call(CalculatorIntent::Select {
                                question: question_id,
                                score: option.score,
                            });
                        },
                    }
                    span { "{option.label}" }
                }
            }
        }
    }
}
