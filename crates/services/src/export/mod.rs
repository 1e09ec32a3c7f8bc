use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eco_core::model::HistoryEntry;
use eco_core::scoring::ScoreReport;

use crate::Clock;
use crate::calculator::Calculator;
use crate::error::ExportError;

mod pdf;

pub use pdf::{PdfExporter, render_pdf};

/// File name used for every exported result.
pub const EXPORT_FILE_NAME: &str = "ecological_footprint_result.pdf";

/// Snapshot of the result view handed to an exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub report: ScoreReport,
    pub history: Vec<HistoryEntry>,
    pub generated_at: DateTime<Utc>,
}

impl ExportDocument {
    /// # Errors
    ///
    /// Returns `ExportError::NotSubmitted` unless the calculator holds a submitted result.
    pub fn from_calculator(
        calculator: &Calculator,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, ExportError> {
        if !calculator.is_submitted() {
            return Err(ExportError::NotSubmitted);
        }
        Ok(Self {
            title: "Ecological Footprint Result".to_owned(),
            report: calculator.report(),
            history: calculator.history().to_vec(),
            generated_at,
        })
    }
}

/// Renders a result document somewhere the user can pick it up.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Write `document` as `file_name` and return where it landed.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or writing fails.
    async fn export(
        &self,
        document: &ExportDocument,
        file_name: &str,
    ) -> Result<PathBuf, ExportError>;
}

/// Runs exports one at a time.
#[derive(Clone)]
pub struct ExportService {
    clock: Clock,
    exporter: Arc<dyn DocumentExporter>,
    in_flight: Arc<AtomicBool>,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExportService {
    #[must_use]
    pub fn new(clock: Clock, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self {
            clock,
            exporter,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Export the calculator's current result.
    ///
    /// The calculator is only read; a failed export leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InProgress` while another export is pending,
    /// `ExportError::NotSubmitted` without a result, or the exporter's error.
    pub async fn export(&self, calculator: &Calculator) -> Result<PathBuf, ExportError> {
        let document = ExportDocument::from_calculator(calculator, self.clock.now())?;
        self.export_document(&document).await
    }

    /// # Errors
    ///
    /// Returns `ExportError::InProgress` while another export is pending, or the exporter's error.
    pub async fn export_document(&self, document: &ExportDocument) -> Result<PathBuf, ExportError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExportError::InProgress);
        }
        let _guard = InFlight(&self.in_flight);

        match self.exporter.export(document, EXPORT_FILE_NAME).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "result exported");
                Ok(path)
            }
            Err(err) => {
                tracing::error!(error = %err, "result export failed");
                Err(err)
            }
        }
    }
}
