use std::sync::Arc;

use services::{CalculatorService, ExportService};

pub trait UiApp: Send + Sync {
    fn calculator(&self) -> Arc<CalculatorService>;
    fn export(&self) -> Arc<ExportService>;
}

#[derive(Clone)]
pub struct AppContext {
    calculator: Arc<CalculatorService>,
    export: Arc<ExportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            calculator: app.calculator(),
            export: app.export(),
        }
    }

    #[must_use]
    pub fn calculator(&self) -> Arc<CalculatorService> {
        Arc::clone(&self.calculator)
    }

    #[must_use]
    pub fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
