use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuestionId;

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    label: String,
    score: u32,
}

impl QuestionOption {
    #[must_use]
    pub fn new(label: impl Into<String>, score: u32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    category: String,
    options: Vec<QuestionOption>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        category: impl Into<String>,
        options: Vec<QuestionOption>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            options,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    /// Returns true if one of the options carries `score`.
    #[must_use]
    pub fn offers_score(&self, score: u32) -> bool {
        self.options.iter().any(|opt| opt.score == score)
    }

    /// Highest score any option of this question can contribute.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.options.iter().map(QuestionOption::score).max().unwrap_or(0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no questions")]
    Empty,

    #[error("question at position {position} has id {found}, expected {expected}")]
    NonSequentialId {
        position: usize,
        expected: u32,
        found: u32,
    },

    #[error("question {0} has no options")]
    NoOptions(QuestionId),

    #[error("question {0} has a blank category")]
    BlankCategory(QuestionId),

    #[error("category {0:?} is used by more than one question")]
    DuplicateCategory(String),
}

/// Ordered, validated list of questions.
///
/// Ids always run `1..=len` in order, every question has at least one option and
/// categories are unique, so per-category lookups never need deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Validate and build a catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, ids are not sequential from 1,
    /// a question has no options, or a category is blank or repeated.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut categories = HashSet::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
            if question.id.value() != expected {
                return Err(CatalogError::NonSequentialId {
                    position,
                    expected,
                    found: question.id.value(),
                });
            }
            if question.options.is_empty() {
                return Err(CatalogError::NoOptions(question.id));
            }
            let category = question.category.trim();
            if category.is_empty() {
                return Err(CatalogError::BlankCategory(question.id));
            }
            if !categories.insert(category.to_owned()) {
                return Err(CatalogError::DuplicateCategory(category.to_owned()));
            }
        }

        Ok(Self { questions })
    }

    /// The six-question ecological footprint questionnaire.
    #[must_use]
    pub fn eco_footprint() -> Self {
        let q = |id: u32, text: &str, category: &str, options: &[(&str, u32)]| {
            Question::new(
                QuestionId::new(id),
                text,
                category,
                options
                    .iter()
                    .map(|(label, score)| QuestionOption::new(*label, *score))
                    .collect(),
            )
        };

        Self {
            questions: vec![
                q(
                    1,
                    "How many kilometres do you drive per week?",
                    "Transport",
                    &[
                        ("None", 0),
                        ("Up to 50 km", 50),
                        ("50 to 150 km", 100),
                        ("More than 150 km", 150),
                    ],
                ),
                q(
                    2,
                    "How often do you eat red meat?",
                    "Food",
                    &[
                        ("Never", 0),
                        ("1 to 2 times a week", 40),
                        ("3 to 5 times a week", 80),
                        ("Daily", 120),
                    ],
                ),
                q(
                    3,
                    "Do you unplug devices or use renewable energy?",
                    "Energy",
                    &[
                        ("Always", 0),
                        ("Sometimes", 20),
                        ("Rarely", 40),
                        ("Never", 60),
                    ],
                ),
                q(
                    4,
                    "Do you separate recyclable waste at home?",
                    "Recycling",
                    &[("Yes", 0), ("Partially", 15), ("No", 30)],
                ),
                q(
                    5,
                    "How many showers longer than 10 minutes do you take per week?",
                    "Water",
                    &[
                        ("None", 0),
                        ("1 to 3", 20),
                        ("4 to 6", 40),
                        ("7 or more", 60),
                    ],
                ),
                q(
                    6,
                    "How often do you buy new clothes?",
                    "Consumption",
                    &[
                        ("Almost never", 0),
                        ("Once a month", 30),
                        ("2 to 3 times a month", 60),
                        ("Weekly", 90),
                    ],
                ),
            ],
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        let index = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.questions.get(index)
    }

    /// Question at a 0-based position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::eco_footprint()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let questions = Vec::<Question>::deserialize(deserializer)?;
        Catalog::new(questions).map_err(serde::de::Error::custom)
    }
}
