/*!
 * Main application controller.
 *
 * Wires configuration, backend, orchestrator/pipeline, store and review
 * queue together and exposes the two run modes:
 *
 * - `run_batch`: plain batch translation with retry/fallback
 * - `run_reviewed`: the 3-stage agent pipeline with quality gating
 *
 * Both modes filter already-translated entries through the store first, so
 * repeating a run after an interruption picks up exactly where it left off.
 */

use anyhow::Result;
use log::info;

use crate::agents::reviewer::RegionalProfile;
use crate::agents::AgentPipeline;
use crate::app_config::Config;
use crate::catalog::{RunSummary, TranslationEntry, TranslationRecord};
use crate::errors::AppError;
use crate::store::{ReviewQueue, TranslationStore};
use crate::translation::backend::{ReviewBackend, TranslationBackend};
use crate::translation::llm_backend::LlmBackend;
use crate::translation::orchestrator::{BatchOrchestrator, CancellationFlag};

/// Application controller owning the validated configuration.
pub struct Controller {
    config: Config,
}

impl Controller {
    /// Create a controller, validating the configuration once up front.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The controller's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the LLM backend described by the configuration.
    pub fn build_backend(&self) -> Result<LlmBackend> {
        LlmBackend::new(&self.config)
    }

    /// Run plain batch translation with the configured backend.
    pub async fn run_batch<S>(
        &self,
        entries: &[TranslationEntry],
        store: &S,
        cancel: CancellationFlag,
        progress: impl Fn(usize, usize),
    ) -> Result<RunSummary, AppError>
    where
        S: TranslationStore + ?Sized,
    {
        let backend = self.build_backend().map_err(AppError::from)?;
        self.run_batch_with(backend, entries, store, cancel, progress)
            .await
    }

    /// Run plain batch translation with an explicit backend.
    pub async fn run_batch_with<B, S>(
        &self,
        backend: B,
        entries: &[TranslationEntry],
        store: &S,
        cancel: CancellationFlag,
        progress: impl Fn(usize, usize),
    ) -> Result<RunSummary, AppError>
    where
        B: TranslationBackend,
        S: TranslationStore + ?Sized,
    {
        let remaining = store.filter_untranslated(entries);
        if remaining.is_empty() {
            info!("All entries are already translated. Nothing to do.");
            return Ok(RunSummary::default());
        }

        let orchestrator =
            BatchOrchestrator::with_cancellation(backend, self.config.orchestrator_config(), cancel);
        let report = orchestrator.run(&remaining, progress).await;

        store.upsert_translations(&report.translations);

        let summary = report.summary();
        info!("Batch run complete: {}", summary);
        Ok(summary)
    }

    /// Run the agent pipeline with the configured backend.
    pub async fn run_reviewed<S, Q>(
        &self,
        entries: &[TranslationEntry],
        store: &S,
        queue: &Q,
        profile: Option<RegionalProfile>,
    ) -> Result<RunSummary, AppError>
    where
        S: TranslationStore + ?Sized,
        Q: ReviewQueue + ?Sized,
    {
        let backend = self.build_backend().map_err(AppError::from)?;
        self.run_reviewed_with(backend, entries, store, queue, profile)
            .await
    }

    /// Run the agent pipeline with an explicit backend.
    ///
    /// A `PipelineError` surfaces as `AppError::Pipeline`, distinct from
    /// runs where only individual entries failed.
    pub async fn run_reviewed_with<B, S, Q>(
        &self,
        backend: B,
        entries: &[TranslationEntry],
        store: &S,
        queue: &Q,
        profile: Option<RegionalProfile>,
    ) -> Result<RunSummary, AppError>
    where
        B: TranslationBackend + ReviewBackend,
        S: TranslationStore + ?Sized,
        Q: ReviewQueue + ?Sized,
    {
        let remaining = store.filter_untranslated(entries);
        if remaining.is_empty() {
            info!("All entries are already translated. Nothing to do.");
            return Ok(RunSummary::default());
        }

        let pipeline = AgentPipeline::new(
            backend,
            self.config.retry_policy(),
            profile,
            self.config.quality.threshold,
        );
        let output = pipeline.run(remaining).await?;

        let records: Vec<TranslationRecord> =
            output.accepted.iter().map(|r| r.to_record()).collect();
        store.upsert_translations(&records);

        for result in &output.needs_review {
            queue.submit(result.clone());
        }

        let summary = output.summary();
        info!("Reviewed run complete: {}", summary);
        Ok(summary)
    }
}
