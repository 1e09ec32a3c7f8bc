mod calculator;
mod chart;
mod questionnaire;
mod result;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use calculator::CalculatorView;
pub use chart::PieChart;
pub use questionnaire::QuestionnaireSection;
pub use result::ResultSection;
pub use state::{ViewError, ViewState, view_state_from_resource};
