use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One past submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(alias = "date")]
    timestamp: String,
    total: u32,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(timestamp: impl Into<String>, total: u32) -> Self {
        Self {
            timestamp: timestamp.into(),
            total,
        }
    }

    /// Build an entry stamped with `at` in RFC 3339 form.
    #[must_use]
    pub fn recorded_at(at: DateTime<Utc>, total: u32) -> Self {
        Self::new(at.to_rfc3339(), total)
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Parsed timestamp, if it was written in RFC 3339 form.
    #[must_use]
    pub fn recorded(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    /// Human-readable timestamp; falls back to the stored text when it is not RFC 3339.
    #[must_use]
    pub fn display_timestamp(&self) -> String {
        self.recorded().map_or_else(
            || self.timestamp.clone(),
            |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn keeps_rfc3339_timestamp() {
        let entry = HistoryEntry::recorded_at(fixed_now(), 175);
        assert_eq!(entry.recorded(), Some(fixed_now()));
        assert_eq!(entry.total(), 175);
        assert_eq!(entry.display_timestamp(), "2023-11-14 22:13 UTC");
    }

    #[test]
    fn accepts_legacy_date_field() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"date":"14/11/2023, 22:13:20","total":90}"#).unwrap();
        assert_eq!(entry.timestamp(), "14/11/2023, 22:13:20");
        assert_eq!(entry.recorded(), None);
        assert_eq!(entry.display_timestamp(), "14/11/2023, 22:13:20");
        assert_eq!(entry.total(), 90);
    }
}
