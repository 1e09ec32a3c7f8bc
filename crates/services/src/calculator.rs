use std::sync::Arc;

use eco_core::model::{AnswerSet, Catalog, HistoryEntry, Question, QuestionId};
use eco_core::scoring::ScoreReport;
use eco_core::{FormError, FormPhase, QuestionnaireForm};
use storage::repository::KeyValueStore;

use crate::Clock;
use crate::error::CalculatorError;
use crate::persistence::{PersistenceService, StorageOperation, StorageWarning};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Questionnaire state plus the submission history.
///
/// Synchronous edits (`select_option`, `advance`) happen here directly.
/// Transitions that touch storage go through `CalculatorService`.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    form: QuestionnaireForm,
    history: Vec<HistoryEntry>,
    warnings: Vec<StorageWarning>,
}

impl Calculator {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            form: QuestionnaireForm::new(catalog),
            history: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &QuestionnaireForm {
        &self.form
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.form.catalog()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        self.form.answers()
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.form.phase()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.form.is_submitted()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.form.current_question()
    }

    /// History entries, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Storage problems since the last `dismiss_warnings`.
    #[must_use]
    pub fn warnings(&self) -> &[StorageWarning] {
        &self.warnings
    }

    pub fn dismiss_warnings(&mut self) {
        self.warnings.clear();
    }

    /// # Errors
    ///
    /// Returns `FormError` if the question or score is not in the catalog.
    pub fn select_option(&mut self, question: QuestionId, score: u32) -> Result<(), FormError> {
        self.form.select_option(question, score)
    }

    pub fn advance(&mut self) {
        self.form.advance();
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.form.can_submit()
    }

    #[must_use]
    pub fn report(&self) -> ScoreReport {
        ScoreReport::build(self.form.catalog(), self.form.answers())
    }

    fn warn(&mut self, operation: StorageOperation, err: &storage::StorageError) {
        tracing::warn!(%operation, error = %err, "continuing without durable storage");
        self.warnings.push(StorageWarning::new(operation, err));
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Drives the calculator lifecycle: load on start, save on each transition.
#[derive(Clone)]
pub struct CalculatorService {
    clock: Clock,
    catalog: Arc<Catalog>,
    persistence: PersistenceService,
}

impl CalculatorService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            catalog,
            persistence: PersistenceService::new(store),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Rehydrate state from storage.
    ///
    /// A saved result puts the calculator straight into `Submitted`. Storage
    /// failures are recorded as warnings and leave the state empty.
    pub async fn load(&self) -> Calculator {
        let mut calculator = Calculator::new(Arc::clone(&self.catalog));

        match self.persistence.load_result().await {
            Ok(Some(answers)) => {
                calculator.form = QuestionnaireForm::submitted(Arc::clone(&self.catalog), answers);
            }
            Ok(None) => {}
            Err(err) => calculator.warn(StorageOperation::LoadResult, &err),
        }

        match self.persistence.load_history().await {
            Ok(history) => calculator.history = history,
            Err(err) => calculator.warn(StorageOperation::LoadHistory, &err),
        }

        tracing::debug!(
            submitted = calculator.is_submitted(),
            history = calculator.history.len(),
            "calculator loaded"
        );
        calculator
    }

    /// Submit a complete answer set: persist it and append a history entry.
    ///
    /// # Errors
    ///
    /// Returns `CalculatorError::Form` if some question is unanswered. Storage
    /// failures are not errors; they are recorded as warnings.
    pub async fn submit(&self, calculator: &mut Calculator) -> Result<HistoryEntry, CalculatorError> {
        calculator.form.submit()?;

        let total = calculator.report().total;
        let entry = HistoryEntry::recorded_at(self.clock.now(), total);
        calculator.history.push(entry.clone());

        if let Err(err) = self.persistence.save_result(calculator.form.answers()).await {
            calculator.warn(StorageOperation::SaveResult, &err);
        }
        if let Err(err) = self.persistence.save_history(&calculator.history).await {
            calculator.warn(StorageOperation::SaveHistory, &err);
        }

        tracing::info!(total, history = calculator.history.len(), "result submitted");
        Ok(entry)
    }

    /// Drop the current result and start over. History is kept.
    pub async fn reset(&self, calculator: &mut Calculator) {
        calculator.form.reset();
        if let Err(err) = self.persistence.clear_result().await {
            calculator.warn(StorageOperation::ClearResult, &err);
        }
        tracing::info!("calculator reset");
    }

    /// Delete every history entry. The current result is kept.
    pub async fn clear_history(&self, calculator: &mut Calculator) {
        calculator.history.clear();
        if let Err(err) = self.persistence.clear_history().await {
            calculator.warn(StorageOperation::ClearHistory, &err);
        }
        tracing::info!("history cleared");
    }
}
