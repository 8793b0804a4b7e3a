/*!
 * Integration tests for the agent pipeline.
 *
 * Covers the end-to-end scenarios: full runs through translate, review and
 * gate, per-entry failures that the pipeline tolerates, and stage-level
 * failures that abort the whole unit of work with a diagnostic snapshot.
 */

use locflow::agents::reviewer::RegionalProfile;
use locflow::agents::AgentPipeline;
use locflow::errors::PipelineError;
use locflow::providers::mock::{MockBackend, MockReviewBehavior};

use crate::common::{entries, fast_policy, init_test_logging};

#[tokio::test]
async fn test_pipeline_happyPath_shouldAcceptEverything() {
    init_test_logging();
    let backend = MockBackend::working()
        .with_translation("Hello", "Olá")
        .with_translation("World", "Mundo");
    let counters = backend.clone();

    let pipeline = AgentPipeline::new(backend, fast_policy(3, 3), None, 0.8);
    let output = pipeline.run(entries(&["Hello", "World"])).await.unwrap();

    assert_eq!(output.accepted.len(), 2);
    assert!(output.needs_review.is_empty());
    assert_eq!(output.failed_count, 0);
    assert_eq!(counters.batch_calls(), 1);
    // No profile configured: the review stage must not call the LLM.
    assert_eq!(counters.review_calls(), 0);

    let summary = output.summary();
    assert_eq!(summary.translated_count, 2);
    assert_eq!(summary.total(), 2);
}

#[tokio::test]
async fn test_pipeline_qualityGate_shouldPartitionByThreshold() {
    // One entry comes back blank; the gate must route it to human review.
    let backend = MockBackend::working()
        .with_translation("Please save your work", "Por favor, salve seu trabalho")
        .with_translation("Broken entry here", "");

    let pipeline = AgentPipeline::new(backend, fast_policy(3, 3), None, 0.8);
    let output = pipeline
        .run(entries(&["Please save your work", "Broken entry here"]))
        .await
        .unwrap();

    assert_eq!(output.accepted.len(), 1);
    assert_eq!(output.needs_review.len(), 1);
    assert_eq!(output.needs_review[0].source_text, "Broken entry here");
    assert_eq!(output.needs_review[0].quality_score, 0.0);
    assert!(output.needs_review[0].needs_human_review);
}

#[tokio::test]
async fn test_pipeline_reviewStage_shouldApplyProfileAdjustments() {
    let backend = MockBackend::working()
        .with_translation("Hello", "Ola")
        .with_review_behavior(MockReviewBehavior::Adjusting);

    let pipeline = AgentPipeline::new(
        backend,
        fast_policy(3, 3),
        Some(RegionalProfile::new("Brazil")),
        0.8,
    );
    let output = pipeline.run(entries(&["Hello"])).await.unwrap();

    assert_eq!(output.accepted.len(), 1);
    assert!(output.accepted[0].translated_text.ends_with("[reviewed]"));
}

#[tokio::test]
async fn test_pipeline_perEntryFailure_shouldBeToleratedAndCounted() {
    let backend = MockBackend::failing_batches().with_unrecoverable_entry("World");

    let pipeline = AgentPipeline::new(backend, fast_policy(1, 2), None, 0.8);
    let output = pipeline.run(entries(&["Hello", "World"])).await.unwrap();

    assert_eq!(output.accepted.len(), 1);
    assert_eq!(output.failed_count, 1);

    let summary = output.summary();
    assert_eq!(summary.translated_count, 1);
    assert_eq!(summary.failed_count, 1);
}

#[tokio::test]
async fn test_pipeline_translatorStageFailure_shouldAbortBeforeLaterStages() {
    let backend = MockBackend::auth_failing();
    let counters = backend.clone();

    let pipeline = AgentPipeline::new(
        backend,
        fast_policy(3, 3),
        Some(RegionalProfile::new("Brazil")),
        0.8,
    );
    let error = pipeline.run(entries(&["Hello"])).await.unwrap_err();

    let PipelineError::Failed { stage, snapshot_id, .. } = &error;
    assert_eq!(*stage, "translator");
    assert!(!snapshot_id.is_empty());

    // The reviewer and the fallback path must never have been reached.
    assert_eq!(counters.batch_calls(), 1);
    assert_eq!(counters.single_calls(), 0);
    assert_eq!(counters.review_calls(), 0);

    let snapshot = pipeline.last_snapshot().expect("snapshot must be captured");
    assert_eq!(snapshot.stage, "translator");
    assert_eq!(snapshot.entry_count, 1);
    assert_eq!(snapshot.entries[0].source_text, "Hello");
    assert_eq!(snapshot.entries[0].raw_translation, None);
}

#[tokio::test]
async fn test_pipeline_reviewerStageFailure_shouldAbortWithIntermediateState() {
    let backend = MockBackend::working()
        .with_translation("Hello", "Olá")
        .with_review_behavior(MockReviewBehavior::AuthFailing);
    let counters = backend.clone();

    let pipeline = AgentPipeline::new(
        backend,
        fast_policy(3, 3),
        Some(RegionalProfile::new("Brazil")),
        0.8,
    );
    let error = pipeline.run(entries(&["Hello"])).await.unwrap_err();

    assert_eq!(error.stage(), "regional_reviewer");
    assert_eq!(counters.review_calls(), 1);

    // The snapshot preserves what the translator already produced.
    let snapshot = pipeline.last_snapshot().expect("snapshot must be captured");
    assert_eq!(snapshot.stage, "regional_reviewer");
    assert_eq!(snapshot.entries[0].raw_translation.as_deref(), Some("Olá"));
}

#[tokio::test]
async fn test_pipeline_errorDisplay_shouldBeDistinguishable() {
    let backend = MockBackend::auth_failing();
    let pipeline = AgentPipeline::new(backend, fast_policy(1, 1), None, 0.8);

    let error = pipeline.run(entries(&["Hello"])).await.unwrap_err();
    let rendered = error.to_string();

    assert!(rendered.contains("Agent pipeline failed"));
    assert!(rendered.contains("translator"));
}
