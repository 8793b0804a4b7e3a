/*!
 * Data model for translatable strings and their terminal outcomes.
 *
 * A `TranslationEntry` is the immutable unit of input: one untranslated
 * source string together with the positional context it was discovered in.
 * A `TranslationResult` is the terminal artifact produced once per entry at
 * the end of the quality-gated pipeline. `TranslationRecord` is the minimal
 * shape handed to persistence.
 */

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Context attached to an entry at discovery time.
///
/// Serialized verbatim into translation prompts so the model sees where and
/// how the string is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryContext {
    /// Source locations the string occurs at, as (file, line) pairs
    #[serde(default)]
    pub occurrences: Vec<(String, u32)>,

    /// Developer comment extracted alongside the string
    #[serde(default)]
    pub comment: String,

    /// Comment left by a previous translator
    #[serde(default)]
    pub translator_comment: String,

    /// Extraction flags (e.g. "fuzzy", "python-format")
    #[serde(default)]
    pub flags: BTreeSet<String>,
}

/// One source string awaiting translation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// The untranslated source text
    pub source_text: String,

    /// Usage context for the string
    #[serde(default)]
    pub context: EntryContext,
}

impl TranslationEntry {
    /// Create an entry with empty context.
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            context: EntryContext::default(),
        }
    }

    /// Create an entry with the given context.
    pub fn with_context(source_text: impl Into<String>, context: EntryContext) -> Self {
        Self {
            source_text: source_text.into(),
            context,
        }
    }
}

/// A translated string in the shape the persistence sink accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// The original source text, the upsert key
    pub source_text: String,

    /// The translated text
    pub translated_text: String,
}

impl TranslationRecord {
    /// Pair a source with its translation.
    pub fn new(source_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
        }
    }
}

/// Terminal outcome of the quality-gated pipeline for a single entry.
///
/// Created exactly once per entry; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    /// The original source text
    pub source_text: String,

    /// The final translated text
    pub translated_text: String,

    /// Aggregate quality score in [0, 1]; the minimum across all checks
    pub quality_score: f32,

    /// Whether the result must be routed to a human reviewer
    pub needs_human_review: bool,

    /// Human-readable issues, in check-declaration order
    pub review_reasons: Vec<String>,

    /// Per-check score notes for observability
    pub check_notes: BTreeMap<String, String>,
}

impl TranslationResult {
    /// Persistence shape of this result.
    pub fn to_record(&self) -> TranslationRecord {
        TranslationRecord::new(self.source_text.clone(), self.translated_text.clone())
    }
}

/// Top-level accounting of a run.
///
/// Every input entry's fate lands in exactly one bucket, so silent data
/// loss is structurally impossible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Entries translated and persisted without human involvement
    pub translated_count: usize,

    /// Entries routed to the human review queue
    pub review_count: usize,

    /// Entries that exhausted every translation attempt
    pub failed_count: usize,
}

impl RunSummary {
    /// Total number of entries accounted for.
    pub fn total(&self) -> usize {
        self.translated_count + self.review_count + self.failed_count
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} translated, {} awaiting review, {} failed",
            self.translated_count, self.review_count, self.failed_count
        )
    }
}
