#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use services::{Calculator, ExportError};

use super::questionnaire::QuestionnaireSection;
use super::result::ResultSection;
use super::state::{ViewError, ViewState, view_state_from_resource};
use crate::context::AppContext;
use crate::vm::{CalculatorIntent, FormVm, ResultVm, map_form, map_result};

#[derive(Clone, Debug, PartialEq, Eq)]
enum ExportState {
    Idle,
    Exporting,
    Saved(String),
    Failed(ViewError),
}

enum Screen {
    Form(FormVm),
    Result(ResultVm),
}

#[component]
pub fn CalculatorView() -> Element {
    let ctx = use_context::<AppContext>();
    let calculator_service = ctx.calculator();
    let export_service = ctx.export();

    let calculator = use_signal(|| None::<Calculator>);
    let error = use_signal(|| None::<ViewError>);
    let export_state = use_signal(|| ExportState::Idle);
    // Set while a storage-backed transition is awaiting; state edits are dropped until it clears.
    let busy = use_signal(|| false);

    let calculator_for_resource = calculator_service.clone();
    let resource = use_resource(move || {
        let service = calculator_for_resource.clone();
        let mut calculator = calculator;
        async move {
            let loaded = service.load().await;
            calculator.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let dispatch_intent = {
        let calculator_service = calculator_service.clone();
        let export_service = export_service.clone();
        use_callback(move |intent: CalculatorIntent| {
            let mut calculator = calculator;
            let mut error = error;
            let mut export_state = export_state;
            let mut busy = busy;

            let edits_state = matches!(
                intent,
                CalculatorIntent::Select { .. }
                    | CalculatorIntent::Next
                    | CalculatorIntent::Submit
                    | CalculatorIntent::Reset
                    | CalculatorIntent::ClearHistory
            );
            if edits_state && busy() {
                return;
            }

            match intent {
                CalculatorIntent::Select { question, score } => {
                    if let Some(calc) = calculator.write().as_mut() {
                        let next = calc
                            .select_option(question, score)
                            .err()
                            .map(|_| ViewError::Unknown);
                        error.set(next);
                    }
                }
                CalculatorIntent::Next => {
                    if let Some(calc) = calculator.write().as_mut() {
                        calc.advance();
                    }
                }
                CalculatorIntent::Submit => {
                    let Some(mut local) = calculator() else {
                        return;
                    };
                    let service = calculator_service.clone();
                    busy.set(true);
                    spawn(async move {
                        match service.submit(&mut local).await {
                            Ok(_) => error.set(None),
                            Err(_) => error.set(Some(ViewError::Incomplete)),
                        }
                        calculator.set(Some(local));
                        busy.set(false);
                    });
                }
                CalculatorIntent::Reset => {
                    let Some(mut local) = calculator() else {
                        return;
                    };
                    let service = calculator_service.clone();
                    busy.set(true);
                    spawn(async move {
                        service.reset(&mut local).await;
                        calculator.set(Some(local));
                        error.set(None);
                        if export_state() != ExportState::Exporting {
                            export_state.set(ExportState::Idle);
                        }
                        busy.set(false);
                    });
                }
                CalculatorIntent::ClearHistory => {
                    let Some(mut local) = calculator() else {
                        return;
                    };
                    let service = calculator_service.clone();
                    busy.set(true);
                    spawn(async move {
                        service.clear_history(&mut local).await;
                        calculator.set(Some(local));
                        busy.set(false);
                    });
                }
                CalculatorIntent::Export => {
                    if export_state() == ExportState::Exporting || export_service.is_exporting() {
                        return;
                    }
                    let Some(snapshot) = calculator() else {
                        return;
                    };
                    let export = export_service.clone();
                    export_state.set(ExportState::Exporting);
                    spawn(async move {
                        let next = match export.export(&snapshot).await {
                            Ok(path) => ExportState::Saved(path.display().to_string()),
                            // The export already running owns the state.
                            Err(ExportError::InProgress) => return,
                            Err(_) => ExportState::Failed(ViewError::ExportFailed),
                        };
                        export_state.set(next);
                    });
                }
                CalculatorIntent::DismissNotice => {
                    export_state.set(ExportState::Idle);
                }
                CalculatorIntent::DismissWarnings => {
                    if let Some(calc) = calculator.write().as_mut() {
                        calc.dismiss_warnings();
                    }
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<CalculatorTestHandles>() {
                handles.register(dispatch_intent, calculator);
            }
        }
    }

    let screen = calculator.read().as_ref().map(|calc| {
        if calc.is_submitted() {
            Screen::Result(map_result(calc))
        } else {
            Screen::Form(map_form(calc.form()))
        }
    });
    let warnings: Vec<String> = calculator
        .read()
        .as_ref()
        .map(|calc| calc.warnings().iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    let notice = export_state();
    let exporting = notice == ExportState::Exporting;
    let saving = busy();

    let body = match state {
        ViewState::Idle => rsx! {
            p { "Idle" }
        },
        ViewState::Loading => rsx! {
            p { "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
        },
        ViewState::Ready(()) => match screen {
            None => rsx! {
                p { "Loading..." }
            },
            Some(Screen::Form(form)) => rsx! {
                QuestionnaireSection { form, saving, on_intent: dispatch_intent }
            },
            Some(Screen::Result(result)) => rsx! {
                ResultSection { result, exporting, saving, on_intent: dispatch_intent }
            },
        },
    };

    rsx! {
        div { class: "page calculator",
            if !warnings.is_empty() {
                div { class: "banner banner--warning",
                    p { "Local storage is not working right now. Results may not be kept." }
                    ul {
                        for (index, warning) in warnings.iter().enumerate() {
                            li { key: "{index}", "{warning}" }
                        }
                    }
                    button {
                        id: "dismiss-warnings",
                        class: "btn btn--link",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(CalculatorIntent::DismissWarnings),
                        "Dismiss"
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "form-error", "{err.message()}" }
            }
            {body}
            match notice {
                ExportState::Failed(err) => rsx! {
                    div { class: "modal-backdrop",
                        div { class: "modal",
                            p { class: "modal__message", "{err.message()}" }
                            button {
                                id: "dismiss-notice",
                                class: "btn btn--primary",
                                r#type: "button",
                                onclick: move |_| dispatch_intent.call(CalculatorIntent::DismissNotice),
                                "OK"
                            }
                        }
                    }
                },
                ExportState::Saved(path) => rsx! {
                    p { class: "export-note", "PDF saved to {path}" }
                },
                ExportState::Idle | ExportState::Exporting => rsx! {},
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CalculatorTestHandles {
    dispatch: Rc<RefCell<Option<Callback<CalculatorIntent>>>>,
    calculator: Rc<RefCell<Option<Signal<Option<Calculator>>>>>,
}

#[cfg(test)]
impl CalculatorTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<CalculatorIntent>,
        calculator: Signal<Option<Calculator>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.calculator.borrow_mut() = Some(calculator);
    }

    pub(crate) fn dispatch(&self) -> Callback<CalculatorIntent> {
        (*self.dispatch.borrow()).expect("calculator dispatch registered")
    }

    pub(crate) fn calculator(&self) -> Signal<Option<Calculator>> {
        (*self.calculator.borrow()).expect("calculator signal registered")
    }
}
