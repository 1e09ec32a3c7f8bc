use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::CalculatorView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CalculatorView)] Calculator {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Ecological Footprint Calculator" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

#[component]
fn Footer() -> Element {
    rsx! {
        footer { class: "app-footer",
            p { "Estimates are indicative and based on your own answers." }
            p { "Results are stored only on this computer." }
        }
    }
}
