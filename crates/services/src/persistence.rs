use std::fmt;
use std::sync::Arc;

use eco_core::model::{AnswerSet, HistoryEntry};
use storage::repository::{KeyValueStore, StorageError};
use storage::slots::{
    HISTORY_KEY, RESULT_KEY, decode_answers, decode_history, encode_answers, encode_history,
};

/// Which persistence step degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    LoadResult,
    LoadHistory,
    SaveResult,
    SaveHistory,
    ClearResult,
    ClearHistory,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LoadResult => "load the saved result",
            Self::LoadHistory => "load the saved history",
            Self::SaveResult => "save the result",
            Self::SaveHistory => "save the history",
            Self::ClearResult => "remove the saved result",
            Self::ClearHistory => "remove the saved history",
        };
        f.write_str(label)
    }
}

/// Non-fatal storage failure. The in-memory state moved on regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageWarning {
    pub operation: StorageOperation,
    pub detail: String,
}

impl StorageWarning {
    #[must_use]
    pub fn new(operation: StorageOperation, err: &StorageError) -> Self {
        Self {
            operation,
            detail: err.to_string(),
        }
    }
}

impl fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not {}: {}", self.operation, self.detail)
    }
}

/// Reads and writes the result and history slots.
///
/// Malformed slot contents load as absent. Backend failures are returned to the
/// caller, which decides whether they are fatal.
#[derive(Clone)]
pub struct PersistenceService {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_result(&self) -> Result<Option<AnswerSet>, StorageError> {
        let Some(raw) = self.store.get(RESULT_KEY).await? else {
            return Ok(None);
        };
        match decode_answers(&raw) {
            Ok(answers) => Ok(Some(answers)),
            Err(err) => {
                tracing::warn!(key = RESULT_KEY, error = %err, "ignoring malformed saved result");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let Some(raw) = self.store.get(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };
        match decode_history(&raw) {
            Ok(history) => Ok(history),
            Err(err) => {
                tracing::warn!(key = HISTORY_KEY, error = %err, "ignoring malformed saved history");
                Ok(Vec::new())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be encoded or written.
    pub async fn save_result(&self, answers: &AnswerSet) -> Result<(), StorageError> {
        let raw = encode_answers(answers)?;
        self.store.put(RESULT_KEY, &raw).await
    }

    /// Rewrite the whole history slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be encoded or written.
    pub async fn save_history(&self, history: &[HistoryEntry]) -> Result<(), StorageError> {
        let raw = encode_history(history)?;
        self.store.put(HISTORY_KEY, &raw).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_result(&self) -> Result<(), StorageError> {
        self.store.remove(RESULT_KEY).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear_history(&self) -> Result<(), StorageError> {
        self.store.remove(HISTORY_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::model::QuestionId;
    use eco_core::time::fixed_now;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn missing_slots_load_as_empty() {
        let persistence = PersistenceService::new(Arc::new(InMemoryStore::new()));
        assert_eq!(persistence.load_result().await.unwrap(), None);
        assert!(persistence.load_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_slots_load_as_absent() {
        let store = InMemoryStore::new();
        store.put(RESULT_KEY, "[1, 2").await.unwrap();
        store.put(HISTORY_KEY, "{\"oops\":true}").await.unwrap();

        let persistence = PersistenceService::new(Arc::new(store));
        assert_eq!(persistence.load_result().await.unwrap(), None);
        assert!(persistence.load_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saved_slots_reload() {
        let persistence = PersistenceService::new(Arc::new(InMemoryStore::new()));
        let answers: AnswerSet = [(QuestionId::new(2), 80)].into_iter().collect();
        let history = vec![HistoryEntry::recorded_at(fixed_now(), 80)];

        persistence.save_result(&answers).await.unwrap();
        persistence.save_history(&history).await.unwrap();

        assert_eq!(persistence.load_result().await.unwrap(), Some(answers));
        assert_eq!(persistence.load_history().await.unwrap(), history);

        persistence.clear_result().await.unwrap();
        assert_eq!(persistence.load_result().await.unwrap(), None);
        assert_eq!(persistence.load_history().await.unwrap().len(), 1);
    }

    #[test]
    fn warning_reads_as_sentence() {
        let warning = StorageWarning::new(
            StorageOperation::SaveHistory,
            &StorageError::Unavailable("quota exceeded".into()),
        );
        assert_eq!(
            warning.to_string(),
            "could not save the history: storage unavailable: quota exceeded"
        );
    }
}
