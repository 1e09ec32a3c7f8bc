#![forbid(unsafe_code)]

pub mod form;
pub mod model;
pub mod scoring;
pub mod time;

pub use form::{FormError, FormPhase, QuestionnaireForm};
pub use time::Clock;
