/*!
 * Unit tests for LLM response cleaning and whitespace normalization.
 */

use locflow::errors::BackendError;
use locflow::translation::{clean_json_response, preserve_whitespace};

#[test]
fn test_cleanJsonResponse_fencedArray_shouldReturnArrayOnly() {
    let raw = "```json\n[{\"translated\": \"Bonjour\"}, {\"translated\": \"Monde\"}]\n```";
    let cleaned = clean_json_response(raw).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_cleanJsonResponse_proseAroundObject_shouldSliceToObject() {
    let raw = "Sure! Here is the JSON you wanted:\n{\"translated\": \"Bonjour\"}\nLet me know if...";
    let cleaned = clean_json_response(raw).unwrap();
    assert_eq!(cleaned, r#"{"translated": "Bonjour"}"#);
}

#[test]
fn test_cleanJsonResponse_nestedBrackets_shouldKeepOutermostRegion() {
    let raw = "[{\"translated\": \"a [b] c\"}, {\"translated\": \"d\"}]";
    let cleaned = clean_json_response(raw).unwrap();
    assert_eq!(cleaned, raw);
}

#[test]
fn test_cleanJsonResponse_refusalProse_shouldBeParseFailureNotPartialData() {
    let result = clean_json_response("I am unable to translate these strings.");
    match result {
        Err(BackendError::Parse(_)) => {}
        other => panic!("expected a parse failure, got {:?}", other),
    }
}

#[test]
fn test_cleanJsonResponse_parseFailure_isRetryable() {
    let error = clean_json_response("no json here").unwrap_err();
    assert!(error.is_retryable());
}

#[test]
fn test_preserveWhitespace_paddedSource_shouldWrapTranslation() {
    assert_eq!(preserve_whitespace("  Hello  ", "Bonjour"), "  Bonjour  ");
}

#[test]
fn test_preserveWhitespace_unpaddedSource_shouldAddNoPadding() {
    assert_eq!(preserve_whitespace("Hello", "Bonjour"), "Bonjour");
}

#[test]
fn test_preserveWhitespace_llmAddedPadding_shouldBeStripped() {
    assert_eq!(preserve_whitespace("Hello", "  Bonjour  "), "Bonjour");
}

#[test]
fn test_preserveWhitespace_isIdempotent() {
    let once = preserve_whitespace("  Hello ", "Bonjour");
    let twice = preserve_whitespace("  Hello ", &once);
    assert_eq!(once, twice);
}
