use std::path::PathBuf;
use std::sync::Arc;

use eco_core::model::Catalog;
use storage::repository::Storage;

use crate::Clock;
use crate::calculator::CalculatorService;
use crate::error::AppServicesError;
use crate::export::{DocumentExporter, ExportService, PdfExporter};

/// Assembles app-facing services around one storage backend.
#[derive(Clone)]
pub struct AppServices {
    calculator: Arc<CalculatorService>,
    export: Arc<ExportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and a PDF exporter.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Arc<Catalog>,
        export_dir: PathBuf,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(
            &storage,
            clock,
            catalog,
            Arc::new(PdfExporter::new(export_dir)),
        ))
    }

    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        catalog: Arc<Catalog>,
        exporter: Arc<dyn DocumentExporter>,
    ) -> Self {
        let calculator = Arc::new(CalculatorService::new(
            clock,
            catalog,
            Arc::clone(&storage.slots),
        ));
        let export = Arc::new(ExportService::new(clock, exporter));
        Self { calculator, export }
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
