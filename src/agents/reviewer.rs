/*!
 * Regional reviewer stage of the agent pipeline.
 *
 * Two passes over the unit of work:
 * 1. A deterministic, case-insensitive preferred-synonym replacement, no
 *    LLM involved, always applied.
 * 2. One LLM call carrying the whole batch plus the regional profile,
 *    under the usual bounded-retry discipline.
 *
 * This stage degrades gracefully: if the LLM call never succeeds, the
 * rules-only text from the first pass is kept. Only a fatal backend error
 * aborts the pipeline.
 */

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use log::{info, warn};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::agents::PipelineEntry;
use crate::errors::BackendError;
use crate::translation::backend::{ReviewBackend, ReviewItem};
use crate::translation::retry::RetryPolicy;

/// Formality register requested for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Formality {
    Formal,
    #[default]
    Neutral,
    Informal,
}

impl std::fmt::Display for Formality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formality::Formal => write!(f, "Formal"),
            Formality::Neutral => write!(f, "Neutral"),
            Formality::Informal => write!(f, "Informal"),
        }
    }
}

/// A term that must not appear in reviewed output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForbiddenTerm {
    /// The offending term
    pub term: String,

    /// Why the term is inappropriate for the region
    #[serde(default)]
    pub reason: String,
}

/// Regional expertise profile steering the reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalProfile {
    /// Target region (e.g. "Brazil", "Quebec")
    pub region: String,

    /// Formality register
    #[serde(default)]
    pub formality: Formality,

    /// Free-form cultural notes for the prompt
    #[serde(default)]
    pub cultural_context: String,

    /// Terms that must be replaced
    #[serde(default)]
    pub forbidden_terms: Vec<ForbiddenTerm>,

    /// Deterministic replacements: term -> preferred synonym
    #[serde(default)]
    pub preferred_synonyms: BTreeMap<String, String>,

    /// Industry term -> local translation, prompt guidance only
    #[serde(default)]
    pub industry_jargon: BTreeMap<String, String>,
}

impl RegionalProfile {
    /// Create an empty profile for a region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            formality: Formality::default(),
            cultural_context: String::new(),
            forbidden_terms: Vec::new(),
            preferred_synonyms: BTreeMap::new(),
            industry_jargon: BTreeMap::new(),
        }
    }

    /// Add a forbidden term with its reason.
    pub fn add_forbidden_term(&mut self, term: impl Into<String>, reason: impl Into<String>) {
        self.forbidden_terms.push(ForbiddenTerm {
            term: term.into(),
            reason: reason.into(),
        });
    }

    /// Add a preferred synonym replacement.
    pub fn add_synonym(&mut self, term: impl Into<String>, preferred: impl Into<String>) {
        self.preferred_synonyms.insert(term.into(), preferred.into());
    }

    /// Load a profile from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read profile file {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        serde_json::from_str(&content).map_err(|e| anyhow!("Invalid profile JSON: {}", e))
    }

    /// Apply the deterministic synonym rules to a text.
    ///
    /// Replacement is case-insensitive on the match side and literal on the
    /// replacement side.
    pub fn apply_local_rules(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (original, preferred) in &self.preferred_synonyms {
            let pattern = RegexBuilder::new(&regex::escape(original))
                .case_insensitive(true)
                .build();
            if let Ok(pattern) = pattern {
                result = pattern
                    .replace_all(&result, regex::NoExpand(preferred))
                    .into_owned();
            }
        }
        result
    }
}

/// Agent applying regional adjustments to first-pass translations.
pub struct RegionalReviewerAgent<B: ReviewBackend> {
    backend: Arc<B>,
    profile: Option<RegionalProfile>,
    policy: RetryPolicy,
}

impl<B: ReviewBackend> RegionalReviewerAgent<B> {
    /// Create a reviewer; without a profile the stage is a pass-through.
    pub fn new(backend: Arc<B>, profile: Option<RegionalProfile>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            profile,
            policy,
        }
    }

    /// Review the unit of work in place, writing `reviewed_translation`.
    pub async fn review(&self, unit: &mut [PipelineEntry]) -> Result<(), BackendError> {
        let Some(profile) = &self.profile else {
            info!("[RegionalReviewerAgent] No regional profile configured, skipping review");
            for entry in unit.iter_mut() {
                entry.reviewed_translation = entry.raw_translation.clone();
            }
            return Ok(());
        };

        info!(
            "[RegionalReviewerAgent] Reviewing {} translations for region '{}'",
            unit.len(),
            profile.region
        );

        // First pass: deterministic rules, no LLM needed.
        for entry in unit.iter_mut() {
            entry.reviewed_translation = entry
                .raw_translation
                .as_ref()
                .map(|raw| profile.apply_local_rules(raw));
        }

        // Second pass: one LLM call for cultural nuances, over the entries
        // that actually have a candidate.
        let mut indices = Vec::new();
        let mut items = Vec::new();
        for (index, entry) in unit.iter().enumerate() {
            if let Some(translation) = &entry.reviewed_translation {
                indices.push(index);
                items.push(ReviewItem {
                    source: entry.entry.source_text.clone(),
                    translation: translation.clone(),
                });
            }
        }

        if items.is_empty() {
            return Ok(());
        }

        for attempt in 1..=self.policy.max_batch_retries {
            match self.backend.review_batch(&items, profile).await {
                Ok(adjusted) if adjusted.len() == items.len() => {
                    let changed = adjusted.iter().filter(|a| a.is_some()).count();
                    for (position, adjustment) in adjusted.into_iter().enumerate() {
                        if let Some(text) = adjustment {
                            unit[indices[position]].reviewed_translation = Some(text);
                        }
                    }
                    info!(
                        "[RegionalReviewerAgent] Review adjusted {}/{} entries",
                        changed,
                        items.len()
                    );
                    return Ok(());
                }
                Ok(adjusted) => {
                    warn!(
                        "[RegionalReviewerAgent] Review attempt {}/{} returned {} items for {}",
                        attempt,
                        self.policy.max_batch_retries,
                        adjusted.len(),
                        items.len()
                    );
                }
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    warn!(
                        "[RegionalReviewerAgent] Review attempt {}/{} failed: {}",
                        attempt, self.policy.max_batch_retries, error
                    );
                }
            }

            if attempt < self.policy.max_batch_retries {
                tokio::time::sleep(self.policy.retry_wait).await;
            }
        }

        // The deterministic first pass already produced usable output.
        warn!("[RegionalReviewerAgent] LLM review failed, keeping rule-based results");
        Ok(())
    }
}
