use eco_core::model::HistoryEntry;
use eco_core::scoring::FeedbackTier;
use services::Calculator;

use crate::vm::chart_vm::{ChartVm, map_chart};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub label: String,
}

impl From<&HistoryEntry> for HistoryRowVm {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            label: format!("{}: {} kg CO₂", entry.display_timestamp(), entry.total()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultVm {
    pub total: u32,
    pub feedback: &'static str,
    pub feedback_class: &'static str,
    pub tips: Vec<String>,
    pub history: Vec<HistoryRowVm>,
    pub chart: ChartVm,
}

#[must_use]
pub fn map_result(calculator: &Calculator) -> ResultVm {
    let report = calculator.report();
    let feedback_class = match report.tier {
        FeedbackTier::Low => "feedback feedback--low",
        FeedbackTier::Moderate => "feedback feedback--moderate",
        FeedbackTier::High => "feedback feedback--high",
    };

    ResultVm {
        total: report.total,
        feedback: report.feedback,
        feedback_class,
        chart: map_chart(&report.categories),
        tips: report.tips,
        history: calculator.history().iter().map(HistoryRowVm::from).collect(),
    }
}
