/*!
 * Quality scoring engine for machine translations.
 *
 * Pure evaluation of a (source, translation) pair across independent
 * dimensions:
 * - **Placeholders**: format placeholders survive translation intact
 * - **HTML tags**: markup count is preserved
 * - **Length ratio**: the translation is not absurdly short or long
 * - **Emptiness**: a non-empty source did not produce a blank translation
 * - **Untranslated text**: identical output is either a legitimate cognate
 *   or gets a soft penalty
 *
 * The aggregate score is the minimum over all checks, so one failing
 * dimension cannot be outvoted by the others. Evaluation is total: it never
 * fails, for any input.
 */

pub mod checks;

use std::collections::BTreeMap;

use crate::catalog::TranslationResult;

pub use checks::CheckOutcome;

/// Outcome of evaluating one (source, translation) pair.
#[derive(Debug, Clone)]
pub struct QualityReport {
    /// Aggregate score in [0, 1]; minimum over all checks
    pub score: f32,

    /// Issues found, in check-declaration order
    pub reasons: Vec<String>,

    /// Each check's own score, for observability
    pub check_notes: BTreeMap<String, String>,
}

/// Stateless evaluator running all quality checks.
pub struct QualityEvaluator;

impl QualityEvaluator {
    /// Evaluate a candidate translation against its source.
    pub fn evaluate(source: &str, translation: &str) -> QualityReport {
        let outcomes = [
            checks::check_placeholders(source, translation),
            checks::check_html_tags(source, translation),
            checks::check_length_ratio(source, translation),
            checks::check_empty(source, translation),
            checks::check_untranslated(source, translation),
        ];

        let mut score = 1.0_f32;
        let mut reasons = Vec::new();
        let mut check_notes = BTreeMap::new();

        for outcome in outcomes {
            score = score.min(outcome.score);
            check_notes.insert(outcome.name.to_string(), format!("score={:.2}", outcome.score));
            reasons.extend(outcome.reasons);
        }

        QualityReport {
            score,
            reasons,
            check_notes,
        }
    }
}

/// Threshold gate deciding whether a translation needs human review.
///
/// `needs_human_review` is true iff the aggregate score falls below the
/// configured threshold; no check routes to review through any other path.
#[derive(Debug, Clone, Copy)]
pub struct QualityGate {
    threshold: f32,
}

impl QualityGate {
    /// Create a gate with the given threshold, clamped to [0, 1].
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Evaluate a translation and produce its terminal result.
    pub fn assess(&self, source: &str, translation: &str) -> TranslationResult {
        let report = QualityEvaluator::evaluate(source, translation);

        TranslationResult {
            source_text: source.to_string(),
            translated_text: translation.to_string(),
            quality_score: report.score,
            needs_human_review: report.score < self.threshold,
            review_reasons: report.reasons,
            check_notes: report.check_notes,
        }
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(0.8)
    }
}
