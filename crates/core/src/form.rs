use std::sync::Arc;

use thiserror::Error;

use crate::model::{AnswerSet, Catalog, Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormError {
    #[error("question {0} is not in the catalog")]
    UnknownQuestion(QuestionId),

    #[error("question {question} has no option scoring {score}")]
    UnknownOption { question: QuestionId, score: u32 },

    #[error("{answered} of {required} questions answered")]
    Incomplete { answered: usize, required: usize },
}

/// Where the user is in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Unanswered,
    Answering,
    Submitted,
}

/// In-memory questionnaire state: visible question, recorded answers, phase.
///
/// Holds no storage handles; persistence is driven by the services layer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionnaireForm {
    catalog: Arc<Catalog>,
    answers: AnswerSet,
    current: usize,
    phase: FormPhase,
}

impl QuestionnaireForm {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            answers: AnswerSet::new(),
            current: 0,
            phase: FormPhase::Unanswered,
        }
    }

    /// Rehydrate a form that was already submitted.
    #[must_use]
    pub fn submitted(catalog: Arc<Catalog>, answers: AnswerSet) -> Self {
        Self {
            catalog,
            answers,
            current: 0,
            phase: FormPhase::Submitted,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    /// 0-based position of the visible question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.at(self.current)
    }

    /// Record (or overwrite) the score for a question.
    ///
    /// # Errors
    ///
    /// Returns `FormError` if the question is not in the catalog or does not
    /// offer an option with that score.
    pub fn select_option(&mut self, question: QuestionId, score: u32) -> Result<(), FormError> {
        let q = self
            .catalog
            .get(question)
            .ok_or(FormError::UnknownQuestion(question))?;
        if !q.offers_score(score) {
            return Err(FormError::UnknownOption { question, score });
        }
        self.answers.record(question, score);
        if self.phase == FormPhase::Unanswered {
            self.phase = FormPhase::Answering;
        }
        Ok(())
    }

    /// Move to the next question, wrapping to the first after the last.
    pub fn advance(&mut self) {
        self.current = if self.current + 1 >= self.catalog.len() {
            0
        } else {
            self.current + 1
        };
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.catalog.len()
    }

    /// True once the visible question has an answer.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.answers.contains(q.id()))
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.catalog
            .questions()
            .iter()
            .all(|q| self.answers.contains(q.id()))
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.catalog
            .questions()
            .iter()
            .filter(|q| self.answers.contains(q.id()))
            .count()
    }

    /// Mark the form submitted.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Incomplete` unless every question has an answer.
    pub fn submit(&mut self) -> Result<&AnswerSet, FormError> {
        if !self.can_submit() {
            return Err(FormError::Incomplete {
                answered: self.answered_count(),
                required: self.catalog.len(),
            });
        }
        self.phase = FormPhase::Submitted;
        Ok(&self.answers)
    }

    /// Drop all answers and return to the first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.current = 0;
        self.phase = FormPhase::Answering;
    }
}
