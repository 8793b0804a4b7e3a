/*!
 * Two-level retry state machine: batch attempts, then per-entry fallback.
 *
 * Factored out of the orchestrator so attempt counts and transition points
 * are testable in isolation. One runner invocation covers exactly one batch:
 *
 * ```text
 * AttemptingBatch(1) -> ... -> AttemptingBatch(max) -> FallbackSingleEntry
 * FallbackSingleEntry: per entry, AttemptingSingle(1) -> ... -> EntryFailed
 * ```
 *
 * A batch attempt succeeds only when the backend returns without error AND
 * the result length matches the input length. Anything else is one failed
 * attempt. Entries whose single-entry budget is exhausted resolve to `None`
 * and are dropped from output by the caller.
 */

use std::time::Duration;

use log::{info, warn};

use crate::catalog::TranslationEntry;
use crate::errors::BackendError;
use crate::translation::backend::TranslationBackend;

/// Bounded-retry budget for one batch-translate or single-translate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed for the whole-batch call
    pub max_batch_retries: u32,

    /// Attempts allowed per entry in fallback mode
    pub max_single_retries: u32,

    /// Fixed wait between attempts
    pub retry_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_batch_retries: 3,
            max_single_retries: 3,
            retry_wait: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Policy with no waits, for tests and local backends.
    pub fn immediate(max_batch_retries: u32, max_single_retries: u32) -> Self {
        Self {
            max_batch_retries,
            max_single_retries,
            retry_wait: Duration::ZERO,
        }
    }
}

/// Drives one batch through retries and, on exhaustion, per-entry fallback.
#[derive(Debug, Clone)]
pub struct FallbackRunner {
    policy: RetryPolicy,

    /// When set, a non-retryable backend error escapes immediately instead
    /// of being burned as a failed attempt. The agent pipeline runs in this
    /// mode; plain batch mode does not.
    escalate_fatal: bool,
}

impl FallbackRunner {
    /// Runner for plain batch mode: every error is just a failed attempt.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            escalate_fatal: false,
        }
    }

    /// Runner for pipeline mode: fatal errors escalate to the caller.
    pub fn escalating(policy: RetryPolicy) -> Self {
        Self {
            policy,
            escalate_fatal: true,
        }
    }

    /// The policy this runner was built with.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Translate one batch, retrying and falling back as needed.
    ///
    /// Returns one element per input entry, in order: `Some(text)` on
    /// success, `None` for entries that exhausted every attempt. `Err` is
    /// only possible in escalating mode, for non-retryable backend errors.
    pub async fn translate<B>(
        &self,
        backend: &B,
        entries: &[TranslationEntry],
    ) -> Result<Vec<Option<String>>, BackendError>
    where
        B: TranslationBackend + ?Sized,
    {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        for attempt in 1..=self.policy.max_batch_retries {
            match backend.translate_batch(entries).await {
                Ok(texts) if texts.len() == entries.len() => {
                    return Ok(texts.into_iter().map(Some).collect());
                }
                Ok(texts) => {
                    warn!(
                        "Batch attempt {}/{} returned {} translations for {} entries",
                        attempt,
                        self.policy.max_batch_retries,
                        texts.len(),
                        entries.len()
                    );
                }
                Err(error) => {
                    if self.escalate_fatal && !error.is_retryable() {
                        return Err(error);
                    }
                    warn!(
                        "Batch attempt {}/{} failed: {}",
                        attempt, self.policy.max_batch_retries, error
                    );
                }
            }

            if attempt < self.policy.max_batch_retries {
                tokio::time::sleep(self.policy.retry_wait).await;
            }
        }

        info!(
            "Batch failed after {} attempts, switching to single-entry mode for {} entries",
            self.policy.max_batch_retries,
            entries.len()
        );

        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            results.push(self.translate_single(backend, entry).await?);
        }
        Ok(results)
    }

    /// Translate one entry with its own retry budget.
    async fn translate_single<B>(
        &self,
        backend: &B,
        entry: &TranslationEntry,
    ) -> Result<Option<String>, BackendError>
    where
        B: TranslationBackend + ?Sized,
    {
        for attempt in 1..=self.policy.max_single_retries {
            match backend.translate_one(entry).await {
                Ok(Some(text)) => return Ok(Some(text)),
                Ok(None) => {
                    // The backend declared this entry unrecoverable; do not
                    // retry and do not invent output for it.
                    warn!(
                        "Backend gave up on entry '{}'",
                        preview(&entry.source_text)
                    );
                    return Ok(None);
                }
                Err(error) => {
                    if self.escalate_fatal && !error.is_retryable() {
                        return Err(error);
                    }
                    warn!(
                        "Single-entry attempt {}/{} failed for '{}': {}",
                        attempt,
                        self.policy.max_single_retries,
                        preview(&entry.source_text),
                        error
                    );
                }
            }

            if attempt < self.policy.max_single_retries {
                tokio::time::sleep(self.policy.retry_wait).await;
            }
        }

        warn!(
            "Failed to translate '{}' after {} attempts",
            preview(&entry.source_text),
            self.policy.max_single_retries
        );
        Ok(None)
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(50) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
