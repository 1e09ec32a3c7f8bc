#![forbid(unsafe_code)]

pub mod app_services;
pub mod calculator;
pub mod error;
pub mod export;
pub mod persistence;

pub use eco_core::Clock;

pub use app_services::AppServices;
pub use calculator::{Calculator, CalculatorService};
pub use error::{AppServicesError, CalculatorError, ExportError};
pub use export::{
    DocumentExporter, EXPORT_FILE_NAME, ExportDocument, ExportService, PdfExporter,
};
pub use persistence::{PersistenceService, StorageOperation, StorageWarning};
