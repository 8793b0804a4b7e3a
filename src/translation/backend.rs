/*!
 * Contracts a pluggable LLM translation adapter must satisfy.
 *
 * A backend performs exactly one attempt per call; all retry, fallback and
 * cancellation logic lives with the caller. Backends are expected to have
 * already normalized whitespace (see `response::preserve_whitespace`) and
 * cleaned/parsed the raw LLM output before returning.
 */

use async_trait::async_trait;
use serde::Serialize;

use crate::agents::reviewer::RegionalProfile;
use crate::catalog::TranslationEntry;
use crate::errors::BackendError;

/// A translated (source, candidate) pair submitted for regional review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    /// The original source text
    pub source: String,

    /// The current candidate translation
    pub translation: String,
}

/// Common trait for translation backends.
///
/// Implementations must be safe to call sequentially any number of times;
/// they hold no per-run state.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate a batch of entries in one round-trip.
    ///
    /// A result list whose length differs from the input is a *semantic*
    /// failure the caller must check for explicitly; the backend returns
    /// whatever it managed to parse.
    ///
    /// # Arguments
    /// * `entries` - The entries to translate, in order
    ///
    /// # Returns
    /// * `Result<Vec<String>, BackendError>` - Translated texts in input order
    async fn translate_batch(
        &self,
        entries: &[TranslationEntry],
    ) -> Result<Vec<String>, BackendError>;

    /// Translate a single entry.
    ///
    /// `Ok(None)` signals an unrecoverable failure for this one entry: the
    /// caller must not invent output for it and must not retry.
    async fn translate_one(
        &self,
        entry: &TranslationEntry,
    ) -> Result<Option<String>, BackendError>;
}

/// Separate seam for the regional reviewer's single LLM adjustment call.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Review a batch of candidate translations against a regional profile.
    ///
    /// # Returns
    /// * One element per input item: `Some(adjusted)` when the reviewer
    ///   changed the text, `None` to keep the candidate as-is.
    async fn review_batch(
        &self,
        items: &[ReviewItem],
        profile: &RegionalProfile,
    ) -> Result<Vec<Option<String>>, BackendError>;
}
