//! The two persisted slots and their JSON encoding.

use eco_core::model::{AnswerSet, HistoryEntry};

use crate::repository::StorageError;

/// Slot holding the latest submitted answer set.
pub const RESULT_KEY: &str = "ecoCalculatorResult";

/// Slot holding the full submission history, oldest first.
pub const HISTORY_KEY: &str = "ecoCalculatorHistory";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_answers(answers: &AnswerSet) -> Result<String, StorageError> {
    serde_json::to_string(answers).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if `raw` is not an answer object.
pub fn decode_answers(raw: &str) -> Result<AnswerSet, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_history(history: &[HistoryEntry]) -> Result<String, StorageError> {
    serde_json::to_string(history).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if `raw` is not a list of entries.
pub fn decode_history(raw: &str) -> Result<Vec<HistoryEntry>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::model::QuestionId;
    use eco_core::time::fixed_now;

    #[test]
    fn answers_round_trip() {
        let answers: AnswerSet = [(QuestionId::new(1), 150), (QuestionId::new(6), 0)]
            .into_iter()
            .collect();
        let raw = encode_answers(&answers).unwrap();
        assert_eq!(decode_answers(&raw).unwrap(), answers);
    }

    #[test]
    fn history_round_trip() {
        let history = vec![
            HistoryEntry::recorded_at(fixed_now(), 175),
            HistoryEntry::recorded_at(fixed_now(), 510),
        ];
        let raw = encode_history(&history).unwrap();
        assert!(raw.contains("\"timestamp\""));
        assert_eq!(decode_history(&raw).unwrap(), history);
    }

    #[test]
    fn malformed_values_are_serialization_errors() {
        assert!(matches!(
            decode_answers("{\"1\": \"lots\"}"),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            decode_history("not json"),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            decode_history("{\"total\": 3}"),
            Err(StorageError::Serialization(_))
        ));
    }
}
