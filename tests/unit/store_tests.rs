/*!
 * Unit tests for the in-memory store and review queue.
 */

use locflow::catalog::{TranslationRecord, TranslationResult};
use locflow::quality::QualityGate;
use locflow::store::{InMemoryReviewQueue, InMemoryStore, ReviewQueue, TranslationStore};

use crate::common::entries;

fn result_for(source: &str, translation: &str) -> TranslationResult {
    QualityGate::new(0.8).assess(source, translation)
}

#[test]
fn test_store_upsert_lastWriteWins() {
    let store = InMemoryStore::new();

    store.upsert_translations(&[TranslationRecord::new("Hello", "Bonjour")]);
    store.upsert_translations(&[TranslationRecord::new("Hello", "Salut")]);

    assert_eq!(store.get("Hello").as_deref(), Some("Salut"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_store_filterUntranslated_makesRerunsIdempotent() {
    let store = InMemoryStore::new();
    let all = entries(&["Hello", "World", "Again"]);

    store.upsert_translations(&[
        TranslationRecord::new("Hello", "Bonjour"),
        TranslationRecord::new("Again", "Encore"),
    ]);

    let remaining = store.filter_untranslated(&all);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].source_text, "World");

    store.upsert_translations(&[TranslationRecord::new("World", "Monde")]);
    assert!(store.filter_untranslated(&all).is_empty());
}

#[test]
fn test_store_records_shouldBeOrderedBySource() {
    let store = InMemoryStore::new();
    store.upsert_translations(&[
        TranslationRecord::new("zebra", "zebre"),
        TranslationRecord::new("apple", "pomme"),
    ]);

    let records = store.records();
    assert_eq!(records[0].source_text, "apple");
    assert_eq!(records[1].source_text, "zebra");
}

#[test]
fn test_reviewQueue_submitAndPending_shouldPreserveOrder() {
    let queue = InMemoryReviewQueue::new();
    assert!(queue.is_empty());

    queue.submit(result_for("Hello {0}", "Bonjour"));
    queue.submit(result_for("World", ""));

    let pending = queue.pending();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].source_text, "Hello {0}");
    assert!(pending[0].needs_human_review);
    assert_eq!(pending[1].source_text, "World");
    assert_eq!(pending[1].quality_score, 0.0);
}
