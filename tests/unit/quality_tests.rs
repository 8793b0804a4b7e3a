/*!
 * Unit tests for the quality scoring engine.
 *
 * Covers the scoring properties the rest of the system relies on:
 * - placeholder preservation scoring and reason wording
 * - the aggregate score being the minimum over all checks
 * - the threshold predicate being the only review-routing rule
 */

use locflow::quality::{QualityEvaluator, QualityGate};

#[test]
fn test_evaluate_translationWithAllPlaceholders_shouldScorePerfect() {
    let report = QualityEvaluator::evaluate(
        "Hello {name}, you have {0} new messages (%s)",
        "Bonjour {name}, vous avez {0} nouveaux messages (%s)",
    );

    assert_eq!(report.score, 1.0);
    assert!(report.reasons.is_empty());
}

#[test]
fn test_evaluate_removedPlaceholder_shouldDropToPointThree() {
    let report = QualityEvaluator::evaluate(
        "Hello {name}, you have {0} new messages",
        "Bonjour, vous avez de nouveaux messages",
    );

    assert_eq!(report.score, 0.3);
    assert!(report.reasons.iter().any(|r| r.contains("{name}")));
    assert!(report.reasons.iter().any(|r| r.contains("{0}")));
}

#[test]
fn test_evaluate_printfPlaceholders_shouldBeChecked() {
    let report = QualityEvaluator::evaluate(
        "Wrote %d rows for user %(name)s",
        "A ecrit des lignes pour l'utilisateur",
    );

    assert_eq!(report.score, 0.3);
    assert!(report.reasons.iter().any(|r| r.contains("%d")));
    assert!(report.reasons.iter().any(|r| r.contains("%(name)s")));
}

#[test]
fn test_evaluate_scoreIsMinimumAcrossChecks_neverHigher() {
    let cases = [
        ("Hello {0} world", "Bonjour monde"),                     // placeholder 0.3
        ("<b>Save</b> the file", "Enregistrer le fichier"),       // tags 0.5
        ("A reasonably long source sentence here", "Ok"),         // length 0.6
        ("Hello", ""),                                            // empty 0.0
        ("Send the weekly report to the whole team", "Send the weekly report to the whole team"), // untranslated 0.95
        ("Hello world", "Bonjour le monde"),                      // clean 1.0
    ];

    for (source, translation) in cases {
        let report = QualityEvaluator::evaluate(source, translation);
        let minimum = report
            .check_notes
            .values()
            .map(|note| {
                note.trim_start_matches("score=")
                    .parse::<f32>()
                    .expect("note must carry a score")
            })
            .fold(1.0_f32, f32::min);
        assert_eq!(
            report.score, minimum,
            "aggregate must equal the per-check minimum for ({}, {})",
            source, translation
        );
    }
}

#[test]
fn test_evaluate_perCheckNotes_shouldCoverAllFiveChecks() {
    let report = QualityEvaluator::evaluate("Hello", "Bonjour");

    for check in ["placeholders", "html_tags", "length_ratio", "empty", "untranslated"] {
        assert!(
            report.check_notes.contains_key(check),
            "missing note for check '{}'",
            check
        );
    }
}

#[test]
fn test_evaluate_emptyTranslation_shouldZeroAndExplain() {
    let report = QualityEvaluator::evaluate("Hello world", "   \t ");

    assert_eq!(report.score, 0.0);
    assert!(report.reasons.contains(&"Translation is empty".to_string()));
}

#[test]
fn test_evaluate_htmlTagsLost_shouldScoreHalf() {
    let report = QualityEvaluator::evaluate("<b>Bold</b> move", "Geste audacieux");
    assert_eq!(report.score, 0.5);
}

#[test]
fn test_evaluate_identicalTechnicalTerm_shouldNotBePenalized() {
    // Below the length cutoff: presumed cognate or abbreviation.
    let report = QualityEvaluator::evaluate("dashboard", "dashboard");
    assert_eq!(report.score, 1.0);
}

#[test]
fn test_evaluate_identicalLongSentence_shouldSoftPenalize() {
    let text = "Review the changes before merging them";
    let report = QualityEvaluator::evaluate(text, text);
    assert_eq!(report.score, 0.95);
}

#[test]
fn test_gate_thresholdMonotonicity_noCheckBypassesThePredicate() {
    let pairs = [
        ("Hello {0}", "Bonjour"),
        ("Hello world", "Bonjour le monde"),
        ("Hello", ""),
        ("<b>Save</b>", "Sauver"),
        ("Send the weekly report to the whole team", "Send the weekly report to the whole team"),
    ];

    for threshold in [0.0, 0.25, 0.5, 0.8, 0.95, 1.0] {
        let gate = QualityGate::new(threshold);
        for (source, translation) in pairs {
            let result = gate.assess(source, translation);
            assert_eq!(
                result.needs_human_review,
                result.quality_score < threshold,
                "({}, {}) at threshold {}",
                source,
                translation,
                threshold
            );
        }
    }
}

#[test]
fn test_gate_assess_shouldProduceTerminalResultFields() {
    let gate = QualityGate::new(0.8);
    let result = gate.assess("Hello {0}", "Bonjour");

    assert_eq!(result.source_text, "Hello {0}");
    assert_eq!(result.translated_text, "Bonjour");
    assert_eq!(result.quality_score, 0.3);
    assert!(result.needs_human_review);
    assert!(!result.review_reasons.is_empty());
    assert_eq!(result.check_notes.len(), 5);
}
