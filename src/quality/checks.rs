/*!
 * Individual quality checks.
 *
 * Each check is a pure function returning its own score and reasons; the
 * evaluator aggregates them by taking the minimum. Scores and cutoffs here
 * are tunable policy values, not contracts.
 */

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Score assigned when placeholders were lost or invented.
const PLACEHOLDER_PENALTY: f32 = 0.3;

/// Score assigned when the HTML tag count changed.
const TAG_PENALTY: f32 = 0.5;

/// Score assigned when the length ratio falls outside the accepted band.
const LENGTH_PENALTY: f32 = 0.6;

/// Accepted band for chars(translation) / chars(source). Deliberately
/// generous: real translations legitimately vary 0.5x-2.5x in length.
const MIN_LENGTH_RATIO: f32 = 0.3;
const MAX_LENGTH_RATIO: f32 = 3.0;

/// Sources shorter than this are presumed cognates or abbreviations and
/// skip the untranslated-text check entirely.
const UNTRANSLATED_MIN_CHARS: usize = 20;

/// Single-word sources under this length are trusted as already reviewed
/// by the upstream pipeline stages.
const SINGLE_WORD_MAX_CHARS: usize = 15;

/// Soft score for identical text that no exemption covers. By this point
/// the text has passed independent translation and review stages, so the
/// identical output is presumed intentional.
const UNTRANSLATED_SOFT_SCORE: f32 = 0.95;

/// Result of one quality check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Check name used in the per-check notes
    pub name: &'static str,

    /// Score in [0, 1]
    pub score: f32,

    /// Issues found by this check, empty when it passed
    pub reasons: Vec<String>,
}

impl CheckOutcome {
    fn pass(name: &'static str) -> Self {
        Self {
            name,
            score: 1.0,
            reasons: Vec::new(),
        }
    }
}

// Placeholder grammars recognized across the supported template styles.
static PLACEHOLDER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\{\}",                            // {} empty placeholder
        r"#\{\}",                           // #{} hash placeholder
        r"\{[0-9]+\}",                      // {0}, {1}
        r"#\{[0-9]+\}",                     // #{0}, #{1}
        r"\{[a-zA-Z_][a-zA-Z0-9_]*\}",      // {name}, {user_id}
        r"%[sd]",                           // %s, %d
        r"%\([a-zA-Z_][a-zA-Z0-9_]*\)[sd]", // %(name)s
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("placeholder pattern must compile"))
    .collect()
});

static HTML_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern must compile"));

// Strings matching any of these are technical identifiers that legitimately
// survive translation unchanged.
static TECHNICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^[A-Z]{2,}$",                    // acronyms: API, URL, PDF
        r"^[a-z]+_[a-z0-9_]+$",            // snake_case identifiers
        r"^[a-z]+[A-Z][a-zA-Z]*$",         // camelCase identifiers
        r"^\d+[\d\s,\.]*$",                // numbers
        r"^https?://",                     // URLs
        r"^[^@\s]+@[^@\s]+\.[^@\s]+$",     // email-like
        r"^\{[^}]*\}$",                    // a lone placeholder
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("technical pattern must compile"))
    .collect()
});

// Suffixes shared by Romance/English cognates; words ending in one are
// often identical or near-identical across the language pair.
const COGNATE_SUFFIXES: &[&str] = &[
    "tion", "sion", "al", "el", "ment", "ble", "ude", "ive", "ence", "ance", "ism", "ist", "or",
    "er",
];

// Common international/technical vocabulary that stays untranslated.
const TECHNICAL_TERMS: &[&str] = &[
    "email", "e-mail", "data", "status", "menu", "internet", "software", "hardware", "online",
    "offline", "web", "website", "login", "logout", "password", "username", "admin", "user",
    "server", "client", "database", "backup", "cache", "proxy", "api", "url", "html", "css",
    "json", "xml", "http", "https", "pdf", "csv", "excel", "word", "powerpoint", "default",
    "marketing", "design", "layout", "click", "link", "download", "upload", "dashboard",
    "widget", "template", "plugin", "script",
];

/// Check that every placeholder in the source survives in the translation,
/// and that the translation invents none.
///
/// Occurrences are compared as sets per grammar: order-insensitive,
/// duplicates collapsed.
pub fn check_placeholders(source: &str, translation: &str) -> CheckOutcome {
    let mut reasons = Vec::new();

    for pattern in PLACEHOLDER_PATTERNS.iter() {
        let source_matches: BTreeSet<&str> =
            pattern.find_iter(source).map(|m| m.as_str()).collect();
        let translation_matches: BTreeSet<&str> =
            pattern.find_iter(translation).map(|m| m.as_str()).collect();

        let missing: Vec<&str> = source_matches
            .difference(&translation_matches)
            .copied()
            .collect();
        let extra: Vec<&str> = translation_matches
            .difference(&source_matches)
            .copied()
            .collect();

        if !missing.is_empty() {
            reasons.push(format!("Missing placeholders: {}", missing.join(", ")));
        }
        if !extra.is_empty() {
            reasons.push(format!("Extra placeholders: {}", extra.join(", ")));
        }
    }

    if reasons.is_empty() {
        CheckOutcome::pass("placeholders")
    } else {
        CheckOutcome {
            name: "placeholders",
            score: PLACEHOLDER_PENALTY,
            reasons,
        }
    }
}

/// Check that the number of HTML tags is unchanged.
///
/// Only the count is compared; tag identity and order are left to the
/// translation stages.
pub fn check_html_tags(source: &str, translation: &str) -> CheckOutcome {
    let source_tags = HTML_TAG_PATTERN.find_iter(source).count();
    let translation_tags = HTML_TAG_PATTERN.find_iter(translation).count();

    if source_tags != translation_tags {
        CheckOutcome {
            name: "html_tags",
            score: TAG_PENALTY,
            reasons: vec![format!(
                "HTML tag count mismatch: source={}, translation={}",
                source_tags, translation_tags
            )],
        }
    } else {
        CheckOutcome::pass("html_tags")
    }
}

/// Check that the translation length is within a plausible ratio of the
/// source length. Empty sides short-circuit to a pass: emptiness is covered
/// by its own check and dividing by zero helps nobody.
pub fn check_length_ratio(source: &str, translation: &str) -> CheckOutcome {
    if source.is_empty() || translation.is_empty() {
        return CheckOutcome::pass("length_ratio");
    }

    let source_len = source.chars().count() as f32;
    let translation_len = translation.chars().count() as f32;
    let ratio = translation_len / source_len;

    if ratio < MIN_LENGTH_RATIO {
        CheckOutcome {
            name: "length_ratio",
            score: LENGTH_PENALTY,
            reasons: vec![format!("Translation too short: ratio={:.2}", ratio)],
        }
    } else if ratio > MAX_LENGTH_RATIO {
        CheckOutcome {
            name: "length_ratio",
            score: LENGTH_PENALTY,
            reasons: vec![format!("Translation too long: ratio={:.2}", ratio)],
        }
    } else {
        CheckOutcome::pass("length_ratio")
    }
}

/// Check that a non-empty source did not come back blank.
pub fn check_empty(source: &str, translation: &str) -> CheckOutcome {
    if !source.is_empty() && translation.trim().is_empty() {
        CheckOutcome {
            name: "empty",
            score: 0.0,
            reasons: vec!["Translation is empty".to_string()],
        }
    } else {
        CheckOutcome::pass("empty")
    }
}

/// Check whether the translation is just the source echoed back.
///
/// Graduated trust: short strings, technical identifiers, cognates and
/// known international terms pass outright; anything else identical gets a
/// soft penalty rather than a hard failure, because two independent stages
/// already approved it.
pub fn check_untranslated(source: &str, translation: &str) -> CheckOutcome {
    const NAME: &str = "untranslated";

    // Short strings are presumed cognates or abbreviations.
    if source.chars().count() < UNTRANSLATED_MIN_CHARS {
        return CheckOutcome::pass(NAME);
    }

    // Different after case-folding means it was translated.
    if source.trim().to_lowercase() != translation.trim().to_lowercase() {
        return CheckOutcome::pass(NAME);
    }

    let trimmed = source.trim();
    let lowered = trimmed.to_lowercase();

    for pattern in TECHNICAL_PATTERNS.iter() {
        if pattern.is_match(trimmed) {
            return CheckOutcome::pass(NAME);
        }
    }

    for suffix in COGNATE_SUFFIXES {
        if lowered.ends_with(suffix) {
            return CheckOutcome::pass(NAME);
        }
    }

    if TECHNICAL_TERMS.contains(&lowered.as_str()) {
        return CheckOutcome::pass(NAME);
    }

    if source.split_whitespace().count() == 1 && source.chars().count() < SINGLE_WORD_MAX_CHARS {
        return CheckOutcome::pass(NAME);
    }

    CheckOutcome {
        name: NAME,
        score: UNTRANSLATED_SOFT_SCORE,
        reasons: Vec::new(),
    }
}
