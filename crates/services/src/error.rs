//! Shared error types for the services crate.

use thiserror::Error;

use eco_core::FormError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CalculatorService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CalculatorError {
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Errors emitted while exporting a result document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("an export is already in progress")]
    InProgress,
    #[error("there is no submitted result to export")]
    NotSubmitted,
    #[error("failed to render document: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
