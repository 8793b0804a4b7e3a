/*!
 * Language utilities for ISO language code handling.
 *
 * Validates the configured target language and renders a human-readable
 * language name for prompt wording, using ISO 639-1 (2-letter) and
 * ISO 639-3 (3-letter) lookups.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Look up a language from a 2- or 3-letter ISO code.
pub fn lookup_language(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    }
}

/// Validate that a language code is a known ISO 639 code.
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup_language(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// English display name for a language code (e.g. "fr" -> "French").
///
/// Used in prompt wording so the model sees a language name rather than a
/// bare code.
pub fn language_display_name(code: &str) -> Result<String> {
    lookup_language(code)
        .map(|language| language.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}
