use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::QuestionId;

/// The user's chosen score per question.
///
/// At most one score is kept per question; recording again overwrites.
/// Serializes as a JSON object keyed by the decimal question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    scores: BTreeMap<QuestionId, u32>,
}

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `score` for `question`, returning the previous score if any.
    pub fn record(&mut self, question: QuestionId, score: u32) -> Option<u32> {
        self.scores.insert(question, score)
    }

    #[must_use]
    pub fn score_for(&self, question: QuestionId) -> Option<u32> {
        self.scores.get(&question).copied()
    }

    #[must_use]
    pub fn contains(&self, question: QuestionId) -> bool {
        self.scores.contains_key(&question)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, u32)> + '_ {
        self.scores.iter().map(|(id, score)| (*id, *score))
    }
}

impl FromIterator<(QuestionId, u32)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, u32)>>(iter: I) -> Self {
        let mut answers = Self::new();
        for (id, score) in iter {
            answers.record(id, score);
        }
        answers
    }
}
