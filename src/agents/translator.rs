/*!
 * Translator stage of the agent pipeline.
 *
 * Produces the first-pass translation for every entry in a unit of work,
 * using the same batch-with-fallback discipline as the batch orchestrator.
 * Runs the fallback machinery in escalating mode: a fatal backend error is
 * a stage failure, not a burned attempt.
 */

use std::sync::Arc;

use log::info;

use crate::agents::PipelineEntry;
use crate::catalog::TranslationEntry;
use crate::errors::BackendError;
use crate::translation::backend::TranslationBackend;
use crate::translation::retry::{FallbackRunner, RetryPolicy};

/// Agent producing `raw_translation` for every entry.
pub struct TranslatorAgent<B: TranslationBackend> {
    backend: Arc<B>,
    runner: FallbackRunner,
}

impl<B: TranslationBackend> TranslatorAgent<B> {
    /// Create a translator over the shared backend.
    pub fn new(backend: Arc<B>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            runner: FallbackRunner::escalating(policy),
        }
    }

    /// Translate the unit of work in place.
    ///
    /// Entries whose every attempt is exhausted keep `raw_translation =
    /// None`; they are accounted as failed at the gate. `Err` means the
    /// stage itself failed and the pipeline must abort.
    pub async fn translate(&self, unit: &mut [PipelineEntry]) -> Result<(), BackendError> {
        info!("[TranslatorAgent] Translating batch of {} entries", unit.len());

        let entries: Vec<TranslationEntry> = unit.iter().map(|e| e.entry.clone()).collect();
        let results = self.runner.translate(self.backend.as_ref(), &entries).await?;

        let translated = results.iter().filter(|r| r.is_some()).count();
        for (entry, result) in unit.iter_mut().zip(results) {
            entry.raw_translation = result;
        }

        info!(
            "[TranslatorAgent] Translated {}/{} entries",
            translated,
            unit.len()
        );
        Ok(())
    }
}
