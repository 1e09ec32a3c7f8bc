//! Scoring of a completed questionnaire.
//!
//! Everything here is a pure function of a catalog and an answer set. Missing
//! answers count as zero.

use serde::Serialize;

use crate::model::{AnswerSet, Catalog};

/// Totals below this land in [`FeedbackTier::Low`].
pub const LOW_TIER_LIMIT: u32 = 100;

/// Totals below this (and at or above [`LOW_TIER_LIMIT`]) land in [`FeedbackTier::Moderate`].
pub const MODERATE_TIER_LIMIT: u32 = 250;

/// A category score strictly above this produces a tip.
pub const TIP_THRESHOLD: u32 = 50;

/// Chart colors, cycled by category position.
pub const CATEGORY_COLORS: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#A28BE0", "#FF5D9E",
];

#[must_use]
pub fn category_color(index: usize) -> &'static str {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

/// Feedback band for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedbackTier {
    Low,
    Moderate,
    High,
}

impl FeedbackTier {
    #[must_use]
    pub fn for_total(total: u32) -> Self {
        if total < LOW_TIER_LIMIT {
            Self::Low
        } else if total < MODERATE_TIER_LIMIT {
            Self::Moderate
        } else {
            Self::High
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Low => "Excellent! Your ecological footprint is low.",
            Self::Moderate => "Good! But there is still room for improvement.",
            Self::High => "Warning! Your actions are generating a high environmental impact.",
        }
    }
}

/// Sum of recorded scores over the catalog's questions.
#[must_use]
pub fn total(catalog: &Catalog, answers: &AnswerSet) -> u32 {
    catalog
        .questions()
        .iter()
        .map(|q| answers.score_for(q.id()).unwrap_or(0))
        .fold(0_u32, u32::saturating_add)
}

#[must_use]
pub fn feedback(total: u32) -> &'static str {
    FeedbackTier::for_total(total).message()
}

/// One tip per category whose score exceeds [`TIP_THRESHOLD`], in catalog order.
#[must_use]
pub fn tips(catalog: &Catalog, answers: &AnswerSet) -> Vec<String> {
    catalog
        .questions()
        .iter()
        .filter(|q| answers.score_for(q.id()).unwrap_or(0) > TIP_THRESHOLD)
        .map(|q| tip_for(q.category()))
        .collect()
}

#[must_use]
pub fn tip_for(category: &str) -> String {
    format!("Rethink your habits in \"{category}\".")
}

/// Score contributed by one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: u32,
}

/// Per-category scores in catalog order (0 when unanswered).
#[must_use]
pub fn category_scores(catalog: &Catalog, answers: &AnswerSet) -> Vec<CategoryScore> {
    catalog
        .questions()
        .iter()
        .map(|q| CategoryScore {
            category: q.category().to_owned(),
            score: answers.score_for(q.id()).unwrap_or(0),
        })
        .collect()
}

/// Everything the result view and the exported document show about a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub total: u32,
    pub tier: FeedbackTier,
    pub feedback: &'static str,
    pub tips: Vec<String>,
    pub categories: Vec<CategoryScore>,
}

impl ScoreReport {
    #[must_use]
    pub fn build(catalog: &Catalog, answers: &AnswerSet) -> Self {
        let total = total(catalog, answers);
        let tier = FeedbackTier::for_total(total);
        Self {
            total,
            tier,
            feedback: tier.message(),
            tips: tips(catalog, answers),
            categories: category_scores(catalog, answers),
        }
    }
}
