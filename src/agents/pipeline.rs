/*!
 * Agent pipeline coordinator.
 *
 * Pipeline flow:
 * 1. `TranslatorAgent`: first-pass translation
 * 2. `RegionalReviewerAgent`: terminology rules + cultural adjustments
 * 3. Quality gate: scoring and routing
 *
 * There is no automatic fallback across the pipeline: if a stage fails
 * hard, the whole unit of work aborts, a diagnostic snapshot is captured
 * for inspection, and a distinguished pipeline-failure error is returned.
 * Shipping silently degraded translations was judged worse than stopping.
 */

use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use crate::agents::reviewer::{RegionalProfile, RegionalReviewerAgent};
use crate::agents::translator::TranslatorAgent;
use crate::agents::PipelineEntry;
use crate::catalog::{RunSummary, TranslationEntry, TranslationResult};
use crate::errors::{BackendError, PipelineError};
use crate::quality::QualityGate;
use crate::translation::backend::{ReviewBackend, TranslationBackend};
use crate::translation::retry::RetryPolicy;

/// Per-entry intermediate state captured when the pipeline aborts.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    /// The source text
    pub source_text: String,

    /// Translator stage output, if reached
    pub raw_translation: Option<String>,

    /// Reviewer stage output, if reached
    pub reviewed_translation: Option<String>,

    /// Final text, if reached
    pub final_text: Option<String>,
}

/// Diagnostic state captured when a stage fails hard.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSnapshot {
    /// Snapshot id, referenced by the returned error
    pub id: String,

    /// Capture timestamp (RFC 3339)
    pub created_at: String,

    /// Stage the failure originated from
    pub stage: &'static str,

    /// The triggering error, rendered
    pub error: String,

    /// Number of entries in the unit of work
    pub entry_count: usize,

    /// Per-entry intermediate state reached so far
    pub entries: Vec<EntrySnapshot>,
}

impl PipelineSnapshot {
    fn capture(stage: &'static str, unit: &[PipelineEntry], error: &BackendError) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            stage,
            error: error.to_string(),
            entry_count: unit.len(),
            entries: unit
                .iter()
                .map(|entry| EntrySnapshot {
                    source_text: entry.entry.source_text.clone(),
                    raw_translation: entry.raw_translation.clone(),
                    reviewed_translation: entry.reviewed_translation.clone(),
                    final_text: entry.final_text.clone(),
                })
                .collect(),
        }
    }
}

/// Result of a completed pipeline run, partitioned by the quality gate.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Results above the quality threshold
    pub accepted: Vec<TranslationResult>,

    /// Results routed to human review
    pub needs_review: Vec<TranslationResult>,

    /// Entries that never obtained a translation
    pub failed_count: usize,
}

impl PipelineOutput {
    /// Accounting view of this output.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            translated_count: self.accepted.len(),
            review_count: self.needs_review.len(),
            failed_count: self.failed_count,
        }
    }
}

/// Coordinates the translation process through the specialized agents.
/// Every result passes the quality gate before anything is handed back.
pub struct AgentPipeline<B: TranslationBackend + ReviewBackend> {
    translator: TranslatorAgent<B>,
    reviewer: RegionalReviewerAgent<B>,
    gate: QualityGate,

    /// Last captured diagnostic snapshot, for external inspection
    last_snapshot: Mutex<Option<PipelineSnapshot>>,
}

impl<B: TranslationBackend + ReviewBackend> AgentPipeline<B> {
    /// Build a pipeline over one shared backend.
    pub fn new(
        backend: B,
        policy: RetryPolicy,
        profile: Option<RegionalProfile>,
        quality_threshold: f32,
    ) -> Self {
        let backend = Arc::new(backend);
        Self {
            translator: TranslatorAgent::new(Arc::clone(&backend), policy),
            reviewer: RegionalReviewerAgent::new(backend, profile, policy),
            gate: QualityGate::new(quality_threshold),
            last_snapshot: Mutex::new(None),
        }
    }

    /// The diagnostic snapshot from the most recent aborted run, if any.
    pub fn last_snapshot(&self) -> Option<PipelineSnapshot> {
        self.last_snapshot.lock().clone()
    }

    /// Execute the full pipeline over one unit of work.
    pub async fn run(
        &self,
        entries: Vec<TranslationEntry>,
    ) -> Result<PipelineOutput, PipelineError> {
        info!("[AgentPipeline] Starting pipeline for {} entries", entries.len());

        let mut unit: Vec<PipelineEntry> = entries.into_iter().map(PipelineEntry::new).collect();

        info!("[AgentPipeline] Phase 1: Translation");
        if let Err(cause) = self.translator.translate(&mut unit).await {
            return Err(self.abort("translator", &unit, cause));
        }

        info!("[AgentPipeline] Phase 2: Regional Review");
        if let Err(cause) = self.reviewer.review(&mut unit).await {
            return Err(self.abort("regional_reviewer", &unit, cause));
        }

        for entry in &mut unit {
            entry.final_text = entry
                .reviewed_translation
                .clone()
                .or_else(|| entry.raw_translation.clone());
        }

        info!("[AgentPipeline] Phase 3: Quality Evaluation");
        let mut output = PipelineOutput::default();
        for entry in unit {
            match entry.final_text {
                Some(text) => {
                    let result = self.gate.assess(&entry.entry.source_text, &text);
                    if result.needs_human_review {
                        output.needs_review.push(result);
                    } else {
                        output.accepted.push(result);
                    }
                }
                None => output.failed_count += 1,
            }
        }

        info!("[AgentPipeline] Pipeline complete: {}", output.summary());
        Ok(output)
    }

    /// Capture a snapshot, log it, and build the distinguished error.
    fn abort(
        &self,
        stage: &'static str,
        unit: &[PipelineEntry],
        cause: BackendError,
    ) -> PipelineError {
        let snapshot = PipelineSnapshot::capture(stage, unit, &cause);
        error!(
            "[AgentPipeline] Pipeline failed at stage '{}': {} (snapshot {})",
            stage, cause, snapshot.id
        );
        if let Ok(json) = serde_json::to_string(&snapshot) {
            error!("[AgentPipeline] Pipeline state snapshot: {}", json);
        }

        let snapshot_id = snapshot.id.clone();
        *self.last_snapshot.lock() = Some(snapshot);

        PipelineError::Failed {
            stage,
            snapshot_id,
            source: cause,
        }
    }
}
