/*!
 * Mock backend implementations for testing.
 *
 * This module provides a scriptable `MockBackend` that simulates backend
 * behaviors without network calls:
 * - `MockBackend::working()` - always succeeds with prefixed translations
 * - `MockBackend::failing_batches()` - batch calls fail, singles succeed
 * - `MockBackend::auth_failing()` - every call fails with a fatal error
 * - `MockBackend::length_mismatch()` - batch responses come back one short
 *
 * Call counters are shared across clones so tests can assert exactly how
 * many batch/single/review calls a component issued.
 */

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::agents::reviewer::RegionalProfile;
use crate::catalog::TranslationEntry;
use crate::errors::BackendError;
use crate::translation::backend::{ReviewBackend, ReviewItem, TranslationBackend};
use crate::translation::response::preserve_whitespace;

/// Behavior mode for translation calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Batch calls always fail; single-entry calls succeed
    FailingBatches,
    /// The first N batch calls fail, later ones succeed
    FailFirst {
        /// Number of leading batch calls that fail
        failures: usize,
    },
    /// Batch responses are one item short; single-entry calls succeed
    LengthMismatch,
    /// Every call fails with a non-retryable authentication error
    AuthFailing,
    /// Calls fail randomly with the given probability
    Flaky {
        /// Probability of failure per call (0.0 to 1.0)
        fail_rate: f64,
    },
}

/// Behavior mode for review calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockReviewBehavior {
    /// Keep every candidate unchanged (all None)
    KeepAll,
    /// Append a review marker to every candidate
    Adjusting,
    /// Always fail with a retryable error
    Failing,
    /// Always fail with a non-retryable authentication error
    AuthFailing,
}

/// Mock backend for exercising orchestrator and pipeline behavior.
#[derive(Debug)]
pub struct MockBackend {
    behavior: MockBehavior,
    review_behavior: MockReviewBehavior,

    /// Scripted translations keyed by source text; unscripted sources get
    /// a "[xx] " prefix
    translations: BTreeMap<String, String>,

    /// Sources for which `translate_one` reports unrecoverable failure
    unrecoverable: HashSet<String>,

    batch_count: Arc<AtomicUsize>,
    single_count: Arc<AtomicUsize>,
    review_count: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a mock with the given translation behavior.
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            review_behavior: MockReviewBehavior::KeepAll,
            translations: BTreeMap::new(),
            unrecoverable: HashSet::new(),
            batch_count: Arc::new(AtomicUsize::new(0)),
            single_count: Arc::new(AtomicUsize::new(0)),
            review_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A backend that always succeeds.
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// A backend whose batch calls always fail.
    pub fn failing_batches() -> Self {
        Self::new(MockBehavior::FailingBatches)
    }

    /// A backend whose first `failures` batch calls fail.
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// A backend whose batch responses are one item short.
    pub fn length_mismatch() -> Self {
        Self::new(MockBehavior::LengthMismatch)
    }

    /// A backend that rejects every call with an authentication error.
    pub fn auth_failing() -> Self {
        Self::new(MockBehavior::AuthFailing)
    }

    /// A backend that fails randomly with the given probability.
    pub fn flaky(fail_rate: f64) -> Self {
        Self::new(MockBehavior::Flaky { fail_rate })
    }

    /// Script an exact translation for a source text.
    pub fn with_translation(
        mut self,
        source: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        self.translations.insert(source.into(), translated.into());
        self
    }

    /// Mark a source text as unrecoverable in single-entry mode.
    pub fn with_unrecoverable_entry(mut self, source: impl Into<String>) -> Self {
        self.unrecoverable.insert(source.into());
        self
    }

    /// Set the review behavior.
    pub fn with_review_behavior(mut self, behavior: MockReviewBehavior) -> Self {
        self.review_behavior = behavior;
        self
    }

    /// Number of `translate_batch` calls observed so far.
    pub fn batch_calls(&self) -> usize {
        self.batch_count.load(Ordering::SeqCst)
    }

    /// Number of `translate_one` calls observed so far.
    pub fn single_calls(&self) -> usize {
        self.single_count.load(Ordering::SeqCst)
    }

    /// Number of `review_batch` calls observed so far.
    pub fn review_calls(&self) -> usize {
        self.review_count.load(Ordering::SeqCst)
    }

    fn render(&self, entry: &TranslationEntry) -> String {
        let translated = match self.translations.get(&entry.source_text) {
            Some(text) => text.clone(),
            None => format!("[xx] {}", entry.source_text.trim()),
        };
        preserve_whitespace(&entry.source_text, &translated)
    }

    fn roll_failure(&self, fail_rate: f64) -> bool {
        rand::random::<f64>() < fail_rate
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            review_behavior: self.review_behavior,
            translations: self.translations.clone(),
            unrecoverable: self.unrecoverable.clone(),
            batch_count: Arc::clone(&self.batch_count),
            single_count: Arc::clone(&self.single_count),
            review_count: Arc::clone(&self.review_count),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate_batch(
        &self,
        entries: &[TranslationEntry],
    ) -> Result<Vec<String>, BackendError> {
        let call_index = self.batch_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(entries.iter().map(|e| self.render(e)).collect()),

            MockBehavior::FailingBatches => Err(BackendError::Request(
                "simulated batch failure".to_string(),
            )),

            MockBehavior::FailFirst { failures } => {
                if call_index < failures {
                    Err(BackendError::Request(format!(
                        "simulated batch failure #{}",
                        call_index + 1
                    )))
                } else {
                    Ok(entries.iter().map(|e| self.render(e)).collect())
                }
            }

            MockBehavior::LengthMismatch => Ok(entries
                .iter()
                .skip(1)
                .map(|e| self.render(e))
                .collect()),

            MockBehavior::AuthFailing => Err(BackendError::Auth(
                "simulated invalid api key".to_string(),
            )),

            MockBehavior::Flaky { fail_rate } => {
                if self.roll_failure(fail_rate) {
                    Err(BackendError::Request("simulated flaky failure".to_string()))
                } else {
                    Ok(entries.iter().map(|e| self.render(e)).collect())
                }
            }
        }
    }

    async fn translate_one(
        &self,
        entry: &TranslationEntry,
    ) -> Result<Option<String>, BackendError> {
        self.single_count.fetch_add(1, Ordering::SeqCst);

        if self.unrecoverable.contains(&entry.source_text) {
            return Ok(None);
        }

        match self.behavior {
            MockBehavior::AuthFailing => Err(BackendError::Auth(
                "simulated invalid api key".to_string(),
            )),
            MockBehavior::Flaky { fail_rate } => {
                if self.roll_failure(fail_rate) {
                    Err(BackendError::Request("simulated flaky failure".to_string()))
                } else {
                    Ok(Some(self.render(entry)))
                }
            }
            _ => Ok(Some(self.render(entry))),
        }
    }
}

#[async_trait]
impl ReviewBackend for MockBackend {
    async fn review_batch(
        &self,
        items: &[ReviewItem],
        _profile: &RegionalProfile,
    ) -> Result<Vec<Option<String>>, BackendError> {
        self.review_count.fetch_add(1, Ordering::SeqCst);

        match self.review_behavior {
            MockReviewBehavior::KeepAll => Ok(items.iter().map(|_| None).collect()),
            MockReviewBehavior::Adjusting => Ok(items
                .iter()
                .map(|item| Some(format!("{} [reviewed]", item.translation)))
                .collect()),
            MockReviewBehavior::Failing => Err(BackendError::Request(
                "simulated review failure".to_string(),
            )),
            MockReviewBehavior::AuthFailing => Err(BackendError::Auth(
                "simulated invalid api key".to_string(),
            )),
        }
    }
}
