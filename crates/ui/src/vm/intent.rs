use eco_core::model::QuestionId;

/// Every user action the calculator view handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalculatorIntent {
    Select { question: QuestionId, score: u32 },
    Next,
    Submit,
    Reset,
    ClearHistory,
    Export,
    DismissNotice,
    DismissWarnings,
}
