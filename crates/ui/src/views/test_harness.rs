use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use eco_core::model::Catalog;
use eco_core::time::fixed_clock;
use services::{
    CalculatorService, DocumentExporter, ExportDocument, ExportError, ExportService,
};
use storage::repository::{InMemoryStore, KeyValueStore};

use crate::context::{UiApp, build_app_context};
use crate::views::CalculatorView;
use crate::views::calculator::CalculatorTestHandles;
use crate::vm::CalculatorIntent;

#[derive(Clone)]
struct TestApp {
    calculator: Arc<CalculatorService>,
    export: Arc<ExportService>,
}

impl UiApp for TestApp {
    fn calculator(&self) -> Arc<CalculatorService> {
        Arc::clone(&self.calculator)
    }

    fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }
}

/// Exporter that never touches the filesystem.
pub struct StubExporter {
    pub fail: bool,
}

#[async_trait]
impl DocumentExporter for StubExporter {
    async fn export(
        &self,
        _document: &ExportDocument,
        file_name: &str,
    ) -> Result<PathBuf, ExportError> {
        if self.fail {
            return Err(ExportError::Render("stub failure".to_string()));
        }
        Ok(PathBuf::from("/exports").join(file_name))
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: CalculatorTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { CalculatorView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub store: Arc<dyn KeyValueStore>,
    pub catalog: Arc<Catalog>,
    pub handles: CalculatorTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned work such as storage writes has landed.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, intent: CalculatorIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness() -> ViewHarness {
    setup_view_harness_with(
        Arc::new(InMemoryStore::new()),
        Arc::new(StubExporter { fail: false }),
    )
}

pub fn setup_view_harness_with(
    store: Arc<dyn KeyValueStore>,
    exporter: Arc<dyn DocumentExporter>,
) -> ViewHarness {
    let clock = fixed_clock();
    let catalog = Arc::new(Catalog::eco_footprint());
    let calculator = Arc::new(CalculatorService::new(
        clock,
        Arc::clone(&catalog),
        Arc::clone(&store),
    ));
    let export = Arc::new(ExportService::new(clock, exporter));
    let handles = CalculatorTestHandles::default();

    let app = Arc::new(TestApp { calculator, export });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        store,
        catalog,
        handles,
    }
}
