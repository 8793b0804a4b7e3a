/*!
 * Agent pipeline for high-fidelity, explainable translation.
 *
 * A 3-stage alternative to the plain batch orchestrator, trading three
 * backend calls per unit of work for explainability and a deterministic
 * terminology layer:
 *
 * 1. `translator`: first-pass translation (batch with fallback)
 * 2. `reviewer`: deterministic terminology rules + an LLM cultural pass
 * 3. quality gate: scoring and routing into auto-accept vs human review
 *
 * Unlike the batch orchestrator, the pipeline has all-or-nothing failure
 * semantics: a stage-level error aborts the whole unit of work and leaves a
 * diagnostic snapshot behind instead of silently degrading.
 */

pub mod pipeline;
pub mod reviewer;
pub mod translator;

pub use pipeline::{AgentPipeline, PipelineOutput, PipelineSnapshot};
pub use reviewer::{Formality, RegionalProfile, RegionalReviewerAgent};
pub use translator::TranslatorAgent;

use crate::catalog::TranslationEntry;

/// A translation entry flowing through the pipeline stages.
///
/// Each stage writes exactly one field, in stage order; a later stage never
/// rewrites an earlier stage's output.
#[derive(Debug, Clone)]
pub struct PipelineEntry {
    /// The immutable input entry
    pub entry: TranslationEntry,

    /// First-pass translation, written by the translator stage
    pub raw_translation: Option<String>,

    /// Regionally adjusted translation, written by the reviewer stage
    pub reviewed_translation: Option<String>,

    /// Text handed to the quality gate
    pub final_text: Option<String>,
}

impl PipelineEntry {
    /// Wrap an input entry with empty stage fields.
    pub fn new(entry: TranslationEntry) -> Self {
        Self {
            entry,
            raw_translation: None,
            reviewed_translation: None,
            final_text: None,
        }
    }
}
