/*!
 * Integration tests for the application controller.
 *
 * Exercise the full wiring: store filtering, orchestrator or pipeline run,
 * persistence of accepted results, and review-queue routing: everything a
 * caller observes from the outside.
 */

use locflow::app_controller::Controller;
use locflow::errors::AppError;
use locflow::providers::mock::MockBackend;
use locflow::store::{InMemoryReviewQueue, InMemoryStore, ReviewQueue, TranslationStore};
use locflow::translation::orchestrator::CancellationFlag;

use crate::common::{entries, init_test_logging, test_config};

#[tokio::test]
async fn test_runBatch_shouldTranslateAndPersistEverything() {
    init_test_logging();
    let backend = MockBackend::working()
        .with_translation("Hello", "Olá")
        .with_translation("World", "Mundo");
    let counters = backend.clone();

    let controller = Controller::new(test_config()).unwrap();
    let store = InMemoryStore::new();

    let summary = controller
        .run_batch_with(
            backend,
            &entries(&["Hello", "World"]),
            &store,
            CancellationFlag::new(),
            |_, _| {},
        )
        .await
        .unwrap();

    assert_eq!(summary.translated_count, 2);
    assert_eq!(summary.review_count, 0);
    assert_eq!(summary.failed_count, 0);
    assert_eq!(counters.batch_calls(), 1);
    assert_eq!(store.get("Hello").as_deref(), Some("Olá"));
    assert_eq!(store.get("World").as_deref(), Some("Mundo"));
}

#[tokio::test]
async fn test_runBatch_secondRun_shouldTranslateNothing() {
    let controller = Controller::new(test_config()).unwrap();
    let store = InMemoryStore::new();
    let work = entries(&["Hello", "World"]);

    let first = MockBackend::working();
    controller
        .run_batch_with(first, &work, &store, CancellationFlag::new(), |_, _| {})
        .await
        .unwrap();

    // Everything is stored now; a repeated run must not touch the backend.
    let second = MockBackend::working();
    let counters = second.clone();
    let summary = controller
        .run_batch_with(second, &work, &store, CancellationFlag::new(), |_, _| {})
        .await
        .unwrap();

    assert_eq!(counters.batch_calls(), 0);
    assert_eq!(summary.translated_count, 0);
    assert_eq!(summary.total(), 0);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_runBatch_preCancelled_shouldStopCleanlyWithoutCalls() {
    let backend = MockBackend::working();
    let counters = backend.clone();

    let controller = Controller::new(test_config()).unwrap();
    let store = InMemoryStore::new();

    let cancel = CancellationFlag::new();
    cancel.cancel();

    let summary = controller
        .run_batch_with(backend, &entries(&["Hello"]), &store, cancel, |_, _| {})
        .await
        .unwrap();

    assert_eq!(counters.batch_calls(), 0);
    assert_eq!(summary.translated_count, 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_runBatch_failedEntries_shouldBeCountedNotPersisted() {
    let backend = MockBackend::failing_batches().with_unrecoverable_entry("World");

    let controller = Controller::new(test_config()).unwrap();
    let store = InMemoryStore::new();

    let summary = controller
        .run_batch_with(
            backend,
            &entries(&["Hello", "World"]),
            &store,
            CancellationFlag::new(),
            |_, _| {},
        )
        .await
        .unwrap();

    assert_eq!(summary.translated_count, 1);
    assert_eq!(summary.failed_count, 1);
    assert!(store.get("World").is_none());
}

#[tokio::test]
async fn test_runReviewed_shouldPersistAcceptedAndQueueFlagged() {
    let backend = MockBackend::working()
        .with_translation("Please save your work", "Por favor, salve seu trabalho")
        .with_translation("Broken entry here", "");

    let controller = Controller::new(test_config()).unwrap();
    let store = InMemoryStore::new();
    let queue = InMemoryReviewQueue::new();

    let summary = controller
        .run_reviewed_with(
            backend,
            &entries(&["Please save your work", "Broken entry here"]),
            &store,
            &queue,
            None,
        )
        .await
        .unwrap();

    assert_eq!(summary.translated_count, 1);
    assert_eq!(summary.review_count, 1);
    assert_eq!(summary.failed_count, 0);

    assert_eq!(
        store.get("Please save your work").as_deref(),
        Some("Por favor, salve seu trabalho")
    );
    assert!(store.get("Broken entry here").is_none());

    let pending = queue.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].source_text, "Broken entry here");
}

#[tokio::test]
async fn test_runReviewed_pipelineFailure_shouldSurfaceDistinctly() {
    let backend = MockBackend::auth_failing();

    let controller = Controller::new(test_config()).unwrap();
    let store = InMemoryStore::new();
    let queue = InMemoryReviewQueue::new();

    let error = controller
        .run_reviewed_with(backend, &entries(&["Hello"]), &store, &queue, None)
        .await
        .unwrap_err();

    match error {
        AppError::Pipeline(pipeline_error) => {
            assert_eq!(pipeline_error.stage(), "translator");
        }
        other => panic!("expected a pipeline error, got {:?}", other),
    }

    // Nothing may have been persisted or queued for an aborted unit.
    assert!(store.is_empty());
    assert!(queue.is_empty());
}
