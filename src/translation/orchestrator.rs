/*!
 * Batch orchestration for translation runs.
 *
 * The orchestrator splits the work list into fixed-size batches and drives
 * each one through the backend with bounded retries and per-entry fallback
 * (see `retry`). Batches are processed strictly sequentially: batch i+1 only
 * starts once batch i is fully resolved, so an interrupted run always leaves
 * a valid, resumable prefix behind. Cancellation is honored between batches,
 * never mid-call.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info};

use crate::catalog::{RunSummary, TranslationEntry, TranslationRecord};
use crate::translation::backend::TranslationBackend;
use crate::translation::retry::{FallbackRunner, RetryPolicy};

/// Configuration for a batch run.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    /// Number of entries per backend call
    pub batch_size: usize,

    /// Retry budget for each batch
    pub retry: RetryPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            retry: RetryPolicy::default(),
        }
    }
}

/// Shared flag for requesting a clean stop between batches.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Create a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the current batch still finishes.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Outcome of one orchestrator run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Successfully translated entries, in input order
    pub translations: Vec<TranslationRecord>,

    /// Entries that exhausted every attempt and were dropped from output
    pub failed_count: usize,

    /// Batches fully resolved before the run ended
    pub batches_completed: usize,

    /// Total batches the input was split into
    pub total_batches: usize,

    /// Whether the run stopped early on a cancellation request
    pub cancelled: bool,
}

impl RunReport {
    /// Accounting view of this report. Batch mode never routes to review.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            translated_count: self.translations.len(),
            review_count: 0,
            failed_count: self.failed_count,
        }
    }
}

/// Sequentially drives batches of entries through a translation backend.
pub struct BatchOrchestrator<B: TranslationBackend> {
    backend: B,
    config: OrchestratorConfig,
    runner: FallbackRunner,
    cancel: CancellationFlag,
}

impl<B: TranslationBackend> BatchOrchestrator<B> {
    /// Create an orchestrator over the given backend.
    pub fn new(backend: B, config: OrchestratorConfig) -> Self {
        Self {
            runner: FallbackRunner::new(config.retry),
            backend,
            config,
            cancel: CancellationFlag::new(),
        }
    }

    /// Create an orchestrator that honors an externally owned flag, e.g.
    /// one wired to a signal handler.
    pub fn with_cancellation(
        backend: B,
        config: OrchestratorConfig,
        cancel: CancellationFlag,
    ) -> Self {
        Self {
            runner: FallbackRunner::new(config.retry),
            backend,
            config,
            cancel,
        }
    }

    /// Handle for requesting cancellation from another task or a signal
    /// handler.
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Split entries into contiguous batches of the configured size. The
    /// last batch may be shorter.
    pub fn split_into_batches<'a>(
        entries: &'a [TranslationEntry],
        batch_size: usize,
    ) -> Vec<&'a [TranslationEntry]> {
        if entries.is_empty() {
            return Vec::new();
        }
        entries.chunks(batch_size.max(1)).collect()
    }

    /// Translate all entries, invoking `progress` with
    /// `(translated_so_far, total_entries)` after each resolved batch.
    pub async fn run(
        &self,
        entries: &[TranslationEntry],
        progress: impl Fn(usize, usize),
    ) -> RunReport {
        let batches = Self::split_into_batches(entries, self.config.batch_size);
        let total_batches = batches.len();
        let total_entries = entries.len();

        info!(
            "Created {} batches of size {} for {} entries",
            total_batches, self.config.batch_size, total_entries
        );

        let mut report = RunReport {
            translations: Vec::with_capacity(total_entries),
            failed_count: 0,
            batches_completed: 0,
            total_batches,
            cancelled: false,
        };

        for (index, batch) in batches.iter().enumerate() {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                info!(
                    "Run cancelled after {}/{} batches; completed batches are kept and the \
                     run can simply be repeated",
                    report.batches_completed, total_batches
                );
                break;
            }

            info!("Translating batch {}/{}", index + 1, total_batches);

            let results = match self.runner.translate(&self.backend, batch).await {
                Ok(results) => results,
                Err(unexpected) => {
                    // Non-escalating runners resolve every error internally;
                    // treat anything that still escapes as a failed batch.
                    error!("Batch {}/{} aborted: {}", index + 1, total_batches, unexpected);
                    vec![None; batch.len()]
                }
            };

            for (entry, result) in batch.iter().zip(results) {
                match result {
                    Some(text) => report
                        .translations
                        .push(TranslationRecord::new(entry.source_text.clone(), text)),
                    None => report.failed_count += 1,
                }
            }

            report.batches_completed += 1;
            progress(report.translations.len(), total_entries);
        }

        info!(
            "Run finished: {} translated, {} failed, {}/{} batches",
            report.translations.len(),
            report.failed_count,
            report.batches_completed,
            total_batches
        );

        report
    }
}
