mod answers;
mod catalog;
mod history;
mod ids;

pub use answers::AnswerSet;
pub use catalog::{Catalog, CatalogError, Question, QuestionOption};
pub use history::HistoryEntry;
pub use ids::QuestionId;
