use std::sync::Arc;
use std::time::Duration;

use eco_core::model::{AnswerSet, HistoryEntry, Question};
use eco_core::time::fixed_now;
use storage::repository::{InMemoryStore, KeyValueStore, StorageError};
use storage::slots::{HISTORY_KEY, RESULT_KEY, encode_answers, encode_history};

use super::test_harness::{StubExporter, ViewHarness, setup_view_harness, setup_view_harness_with};
use crate::vm::CalculatorIntent;

async fn loaded(mut harness: ViewHarness) -> ViewHarness {
    harness.rebuild();
    harness.settle().await;
    harness
}

fn answer_everything(harness: &mut ViewHarness, pick: impl Fn(&Question) -> u32) {
    let catalog = Arc::clone(&harness.catalog);
    let last = catalog.len() - 1;
    for (index, question) in catalog.questions().iter().enumerate() {
        harness.dispatch(CalculatorIntent::Select {
            question: question.id(),
            score: pick(question),
        });
        if index < last {
            harness.dispatch(CalculatorIntent::Next);
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn fresh_start_renders_first_question() {
    let harness = loaded(setup_view_harness()).await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 6"), "missing progress in {html}");
    assert!(
        html.contains("1 - How many kilometres do you drive per week?"),
        "missing first question in {html}"
    );
    assert!(html.contains("Next question"), "missing next button in {html}");
    assert!(
        !html.contains("id=\"calculate\""),
        "calculate shown too early in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn stored_result_renders_result_view() {
    let harness = setup_view_harness();
    let answers: AnswerSet = harness
        .catalog
        .questions()
        .iter()
        .map(|q| (q.id(), q.options()[1].score()))
        .collect();
    let history = vec![HistoryEntry::recorded_at(fixed_now(), 175)];
    harness
        .store
        .put(RESULT_KEY, &encode_answers(&answers).unwrap())
        .await
        .expect("put result");
    harness
        .store
        .put(HISTORY_KEY, &encode_history(&history).unwrap())
        .await
        .expect("put history");

    let harness = loaded(harness).await;
    let html = harness.render();
    assert!(html.contains("Your result"), "missing result heading in {html}");
    assert!(html.contains("175"), "missing total in {html}");
    assert!(
        html.contains("Good! But there is still room for improvement."),
        "missing feedback in {html}"
    );
    assert!(!html.contains("Sustainability tips"), "unexpected tips in {html}");
    assert!(
        html.contains("2023-11-14 22:13 UTC: 175 kg CO₂"),
        "missing history row in {html}"
    );
    assert!(html.contains("Export PDF"), "missing export button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn answering_every_question_submits_and_persists() {
    let mut harness = loaded(setup_view_harness()).await;
    answer_everything(&mut harness, Question::max_score);

    let html = harness.render();
    assert!(html.contains("Question 6 of 6"), "missing last question in {html}");
    assert!(html.contains("Calculate"), "missing calculate in {html}");

    harness.dispatch(CalculatorIntent::Submit);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("510"), "missing total in {html}");
    assert!(
        html.contains("Warning! Your actions are generating a high environmental impact."),
        "missing feedback in {html}"
    );
    assert!(html.contains("Rethink your habits in"), "missing tip in {html}");
    assert!(html.contains("Result history"), "missing history in {html}");

    let stored = harness.store.get(HISTORY_KEY).await.expect("history");
    assert!(stored.is_some_and(|raw| raw.contains("510")));
    assert!(harness.store.get(RESULT_KEY).await.expect("result").is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn start_over_returns_to_first_question_and_keeps_history() {
    let mut harness = loaded(setup_view_harness()).await;
    answer_everything(&mut harness, |q| q.options()[0].score());
    harness.dispatch(CalculatorIntent::Submit);
    harness.settle().await;

    harness.dispatch(CalculatorIntent::Reset);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 6"), "missing first question in {html}");
    assert!(harness.store.get(RESULT_KEY).await.expect("result").is_none());
    assert!(harness.store.get(HISTORY_KEY).await.expect("history").is_some());
    let history_len = harness
        .dom
        .in_runtime(|| harness.handles.calculator().peek().as_ref().map(|c| c.history().len()));
    assert_eq!(history_len, Some(1));
}

#[tokio::test(flavor = "current_thread")]
async fn delete_history_hides_history_list() {
    let mut harness = loaded(setup_view_harness()).await;
    answer_everything(&mut harness, Question::max_score);
    harness.dispatch(CalculatorIntent::Submit);
    harness.settle().await;
    assert!(harness.render().contains("Result history"));

    harness.dispatch(CalculatorIntent::ClearHistory);
    harness.settle().await;

    let html = harness.render();
    assert!(!html.contains("Result history"), "history still shown in {html}");
    assert!(html.contains("Your result"), "result lost in {html}");
    assert!(harness.store.get(HISTORY_KEY).await.expect("history").is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn export_success_reports_saved_path() {
    let mut harness = loaded(setup_view_harness()).await;
    answer_everything(&mut harness, Question::max_score);
    harness.dispatch(CalculatorIntent::Submit);
    harness.settle().await;

    harness.dispatch(CalculatorIntent::Export);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("PDF saved to"), "missing saved note in {html}");
    assert!(
        html.contains("ecological_footprint_result.pdf"),
        "missing file name in {html}"
    );
    assert!(html.contains("Export PDF"), "button still busy in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn export_failure_shows_blocking_notice_until_dismissed() {
    let harness = setup_view_harness_with(
        Arc::new(storage::repository::InMemoryStore::new()),
        Arc::new(StubExporter { fail: true }),
    );
    let mut harness = loaded(harness).await;
    answer_everything(&mut harness, Question::max_score);
    harness.dispatch(CalculatorIntent::Submit);
    harness.settle().await;

    harness.dispatch(CalculatorIntent::Export);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Error generating PDF."), "missing notice in {html}");
    assert!(html.contains("510"), "result lost after failed export in {html}");

    harness.dispatch(CalculatorIntent::DismissNotice);
    let html = harness.render();
    assert!(!html.contains("Error generating PDF."), "notice not dismissed in {html}");
}

struct UnavailableStore;

#[async_trait::async_trait]
impl KeyValueStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn storage_failure_shows_dismissible_banner() {
    let harness = setup_view_harness_with(
        Arc::new(UnavailableStore),
        Arc::new(StubExporter { fail: false }),
    );
    let mut harness = loaded(harness).await;

    let html = harness.render();
    assert!(
        html.contains("could not load the saved result"),
        "missing warning in {html}"
    );
    assert!(html.contains("Question 1 of 6"), "form not usable in {html}");

    harness.dispatch(CalculatorIntent::DismissWarnings);
    let html = harness.render();
    assert!(
        !html.contains("could not load the saved result"),
        "warning not dismissed in {html}"
    );
}

struct SlowStore {
    inner: InMemoryStore,
}

#[async_trait::async_trait]
impl KeyValueStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.inner.put(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.inner.remove(key).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn edits_are_ignored_while_a_save_is_pending() {
    let harness = setup_view_harness_with(
        Arc::new(SlowStore {
            inner: InMemoryStore::new(),
        }),
        Arc::new(StubExporter { fail: false }),
    );
    let mut harness = loaded(harness).await;
    answer_everything(&mut harness, Question::max_score);
    harness.dispatch(CalculatorIntent::Submit);
    harness.settle().await;
    assert!(harness.render().contains("Result history"));

    harness.dispatch(CalculatorIntent::ClearHistory);
    harness.dispatch(CalculatorIntent::Reset);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Your result"), "reset ran during clear in {html}");
    assert!(!html.contains("Result history"), "history came back in {html}");
    let history_len = harness
        .dom
        .in_runtime(|| harness.handles.calculator().peek().as_ref().map(|c| c.history().len()));
    assert_eq!(history_len, Some(0));
    assert!(harness.store.get(HISTORY_KEY).await.expect("history").is_none());
    assert!(harness.store.get(RESULT_KEY).await.expect("result").is_some());

    harness.dispatch(CalculatorIntent::Reset);
    harness.settle().await;
    assert!(harness.render().contains("Question 1 of 6"));
    assert!(harness.store.get(RESULT_KEY).await.expect("result").is_none());
}
