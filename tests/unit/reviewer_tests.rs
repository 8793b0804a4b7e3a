/*!
 * Unit tests for the regional reviewer agent.
 *
 * The reviewer is the one stage that degrades gracefully: its
 * deterministic synonym pass always applies, and a dead review LLM only
 * costs the cultural adjustments.
 */

use std::sync::Arc;

use locflow::agents::reviewer::{RegionalProfile, RegionalReviewerAgent};
use locflow::agents::PipelineEntry;
use locflow::catalog::TranslationEntry;
use locflow::providers::mock::{MockBackend, MockReviewBehavior};

use crate::common::fast_policy;

fn unit_with_raw(pairs: &[(&str, &str)]) -> Vec<PipelineEntry> {
    pairs
        .iter()
        .map(|(source, raw)| {
            let mut entry = PipelineEntry::new(TranslationEntry::new(*source));
            entry.raw_translation = Some(raw.to_string());
            entry
        })
        .collect()
}

fn profile_with_synonym() -> RegionalProfile {
    let mut profile = RegionalProfile::new("Portugal");
    profile.add_synonym("usuario", "utilizador");
    profile
}

#[tokio::test]
async fn test_review_withoutProfile_shouldPassRawThroughWithoutLlmCall() {
    let backend = MockBackend::working();
    let counters = backend.clone();
    let agent = RegionalReviewerAgent::new(Arc::new(backend), None, fast_policy(3, 3));

    let mut unit = unit_with_raw(&[("Hello", "Ola usuario")]);
    agent.review(&mut unit).await.unwrap();

    assert_eq!(unit[0].reviewed_translation.as_deref(), Some("Ola usuario"));
    assert_eq!(counters.review_calls(), 0);
}

#[tokio::test]
async fn test_review_synonymPass_shouldApplyBeforeLlm() {
    let backend = MockBackend::working().with_review_behavior(MockReviewBehavior::KeepAll);
    let agent = RegionalReviewerAgent::new(
        Arc::new(backend),
        Some(profile_with_synonym()),
        fast_policy(3, 3),
    );

    let mut unit = unit_with_raw(&[("Hello user", "Ola Usuario")]);
    agent.review(&mut unit).await.unwrap();

    assert_eq!(
        unit[0].reviewed_translation.as_deref(),
        Some("Ola utilizador")
    );
}

#[tokio::test]
async fn test_review_llmAdjustments_shouldOverrideRuleOutput() {
    let backend = MockBackend::working().with_review_behavior(MockReviewBehavior::Adjusting);
    let agent = RegionalReviewerAgent::new(
        Arc::new(backend),
        Some(profile_with_synonym()),
        fast_policy(3, 3),
    );

    let mut unit = unit_with_raw(&[("Hello", "Ola")]);
    agent.review(&mut unit).await.unwrap();

    assert_eq!(
        unit[0].reviewed_translation.as_deref(),
        Some("Ola [reviewed]")
    );
}

#[tokio::test]
async fn test_review_llmNeverSucceeds_shouldKeepRulesOnlyResult() {
    let backend = MockBackend::working().with_review_behavior(MockReviewBehavior::Failing);
    let counters = backend.clone();
    let agent = RegionalReviewerAgent::new(
        Arc::new(backend),
        Some(profile_with_synonym()),
        fast_policy(3, 3),
    );

    let mut unit = unit_with_raw(&[("Hello user", "Ola usuario")]);
    let result = agent.review(&mut unit).await;

    // Graceful degradation: no error, rules-only text kept, full retry
    // budget spent on the LLM pass.
    assert!(result.is_ok());
    assert_eq!(counters.review_calls(), 3);
    assert_eq!(
        unit[0].reviewed_translation.as_deref(),
        Some("Ola utilizador")
    );
}

#[tokio::test]
async fn test_review_fatalBackendError_shouldEscalate() {
    let backend = MockBackend::working().with_review_behavior(MockReviewBehavior::AuthFailing);
    let counters = backend.clone();
    let agent = RegionalReviewerAgent::new(
        Arc::new(backend),
        Some(profile_with_synonym()),
        fast_policy(3, 3),
    );

    let mut unit = unit_with_raw(&[("Hello", "Ola")]);
    let error = agent.review(&mut unit).await.unwrap_err();

    assert!(!error.is_retryable());
    // A fatal error must not burn the retry budget.
    assert_eq!(counters.review_calls(), 1);
}

#[tokio::test]
async fn test_review_entriesWithoutRaw_shouldBeSkippedByLlmPass() {
    let backend = MockBackend::working().with_review_behavior(MockReviewBehavior::Adjusting);
    let agent = RegionalReviewerAgent::new(
        Arc::new(backend),
        Some(profile_with_synonym()),
        fast_policy(3, 3),
    );

    let mut unit = unit_with_raw(&[("Hello", "Ola")]);
    unit.push(PipelineEntry::new(TranslationEntry::new("Failed one")));

    agent.review(&mut unit).await.unwrap();

    assert_eq!(
        unit[0].reviewed_translation.as_deref(),
        Some("Ola [reviewed]")
    );
    assert_eq!(unit[1].reviewed_translation, None);
}
