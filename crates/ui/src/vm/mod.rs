mod chart_vm;
mod intent;
mod question_vm;
mod result_vm;

pub use chart_vm::{CHART_RADIUS, CHART_SIZE, ChartSliceVm, ChartVm, map_chart};
pub use intent::CalculatorIntent;
pub use question_vm::{FormVm, OptionVm, QuestionVm, map_form};
pub use result_vm::{HistoryRowVm, ResultVm, map_result};
