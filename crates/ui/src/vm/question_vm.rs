use eco_core::QuestionnaireForm;
use eco_core::model::QuestionId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub score: u32,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub heading: String,
    pub category: String,
    pub input_name: String,
    pub options: Vec<OptionVm>,
}

/// What the form needs to render the visible question and its buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormVm {
    pub question: Option<QuestionVm>,
    pub progress_label: String,
    pub is_last: bool,
    pub can_advance: bool,
    pub can_submit: bool,
}

#[must_use]
pub fn map_form(form: &QuestionnaireForm) -> FormVm {
    let answers = form.answers();
    let question = form.current_question().map(|q| QuestionVm {
        id: q.id(),
        heading: format!("{} - {}", q.id(), q.text()),
        category: q.category().to_owned(),
        input_name: format!("question-{}", q.id()),
        options: q
            .options()
            .iter()
            .map(|opt| OptionVm {
                label: opt.label().to_owned(),
                score: opt.score(),
                checked: answers.score_for(q.id()) == Some(opt.score()),
            })
            .collect(),
    });

    FormVm {
        question,
        progress_label: format!(
            "Question {} of {}",
            form.current_index() + 1,
            form.catalog().len()
        ),
        is_last: form.is_last(),
        can_advance: form.can_advance(),
        can_submit: form.can_submit(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eco_core::model::Catalog;

    use super::*;

    #[test]
    fn marks_selected_option_checked() {
        let mut form = QuestionnaireForm::new(Arc::new(Catalog::eco_footprint()));
        form.select_option(QuestionId::new(1), 100).unwrap();

        let vm = map_form(&form);
        let question = vm.question.expect("question");
        assert_eq!(question.heading, "1 - How many kilometres do you drive per week?");
        assert_eq!(question.input_name, "question-1");
        let checked: Vec<_> = question.options.iter().filter(|o| o.checked).collect();
        assert_eq!(checked.len(), 1);
        assert_eq!(checked[0].score, 100);
        assert_eq!(vm.progress_label, "Question 1 of 6");
        assert!(vm.can_advance);
        assert!(!vm.is_last);
        assert!(!vm.can_submit);
    }
}
