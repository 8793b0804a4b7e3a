/*!
 * Contracts for the external collaborators around the translation core.
 *
 * The core does not own persistence or the review workflow; it only needs
 * two narrow seams: a store it can upsert translations into (and ask what
 * is still untranslated, which makes repeated runs naturally idempotent),
 * and a queue it can push review-flagged results onto. In-memory
 * implementations are provided for wiring and tests.
 */

use std::collections::BTreeMap;

use log::{info, warn};
use parking_lot::RwLock;

use crate::catalog::{TranslationEntry, TranslationRecord, TranslationResult};

/// Persistence sink for accepted translations.
///
/// Upserts are keyed by `source_text`, last write wins. A failure to
/// persist one record is logged and skipped, never fatal to the batch.
pub trait TranslationStore: Send + Sync {
    /// Upsert a batch of records; returns how many were stored.
    fn upsert_translations(&self, records: &[TranslationRecord]) -> usize;

    /// Look up the stored translation for a source text.
    fn get(&self, source_text: &str) -> Option<String>;

    /// Entries from the given list that have no stored translation yet.
    fn filter_untranslated(&self, entries: &[TranslationEntry]) -> Vec<TranslationEntry> {
        let remaining: Vec<TranslationEntry> = entries
            .iter()
            .filter(|entry| self.get(&entry.source_text).is_none())
            .cloned()
            .collect();
        info!(
            "Found {} entries to translate ({} already stored)",
            remaining.len(),
            entries.len() - remaining.len()
        );
        remaining
    }
}

/// Queue of results awaiting human review.
///
/// Approvals feed back into the persistence sink outside this crate.
pub trait ReviewQueue: Send + Sync {
    /// Submit a result flagged for human review.
    fn submit(&self, result: TranslationResult);

    /// Results currently awaiting review.
    fn pending(&self) -> Vec<TranslationResult>;
}

/// In-memory translation store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    translations: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored translations.
    pub fn len(&self) -> usize {
        self.translations.read().len()
    }

    /// Whether the store holds no translations.
    pub fn is_empty(&self) -> bool {
        self.translations.read().is_empty()
    }

    /// All stored records, ordered by source text.
    pub fn records(&self) -> Vec<TranslationRecord> {
        self.translations
            .read()
            .iter()
            .map(|(source, translated)| TranslationRecord::new(source.clone(), translated.clone()))
            .collect()
    }
}

impl TranslationStore for InMemoryStore {
    fn upsert_translations(&self, records: &[TranslationRecord]) -> usize {
        let mut saved = 0;
        let mut translations = self.translations.write();

        for record in records {
            if record.source_text.is_empty() || record.translated_text.trim().is_empty() {
                warn!(
                    "Skipping record with empty source or translation: '{}'",
                    record.source_text
                );
                continue;
            }
            translations.insert(record.source_text.clone(), record.translated_text.clone());
            saved += 1;
        }

        info!("Saved {}/{} translations to store", saved, records.len());
        saved
    }

    fn get(&self, source_text: &str) -> Option<String> {
        self.translations.read().get(source_text).cloned()
    }
}

/// In-memory review queue.
#[derive(Debug, Default)]
pub struct InMemoryReviewQueue {
    pending: RwLock<Vec<TranslationResult>>,
}

impl InMemoryReviewQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of results awaiting review.
    pub fn len(&self) -> usize {
        self.pending.read().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.pending.read().is_empty()
    }
}

impl ReviewQueue for InMemoryReviewQueue {
    fn submit(&self, result: TranslationResult) {
        info!(
            "Queued '{}' for human review (score {:.2})",
            result.source_text, result.quality_score
        );
        self.pending.write().push(result);
    }

    fn pending(&self) -> Vec<TranslationResult> {
        self.pending.read().clone()
    }
}
