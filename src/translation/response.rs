/*!
 * Response normalization for LLM output.
 *
 * LLMs wrap JSON payloads in Markdown fences, prepend prose, and mangle
 * surrounding whitespace. Every backend funnels its raw responses through
 * these helpers before structural parsing, so the rest of the pipeline can
 * assume clean input.
 */

use crate::errors::BackendError;

/// Strip Markdown code fences and slice the response down to the outermost
/// balanced JSON region (`[...]` or `{...}`).
///
/// Returns a parse error when no such region exists; a backend must never
/// hand partial data onwards.
pub fn clean_json_response(text: &str) -> Result<String, BackendError> {
    let mut cleaned = text.trim();

    if let Some(stripped) = cleaned.strip_prefix("```json") {
        cleaned = stripped.trim();
    } else if let Some(stripped) = cleaned.strip_prefix("```") {
        cleaned = stripped.trim();
    }

    if let Some(stripped) = cleaned.strip_suffix("```") {
        cleaned = stripped.trim();
    }

    let start = match cleaned.find('[') {
        Some(pos) => Some(pos),
        None => cleaned.find('{'),
    };
    let end = match cleaned.rfind(']') {
        Some(pos) => Some(pos),
        None => cleaned.rfind('}'),
    };

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(cleaned[start..=end].to_string()),
        _ => Err(BackendError::Parse(format!(
            "no JSON array or object found in response: {}",
            truncate_for_log(cleaned)
        ))),
    }
}

/// Reproduce the source's leading and trailing ASCII space runs around the
/// trimmed translation.
///
/// LLMs routinely strip or duplicate surrounding whitespace; normalizing at
/// the backend boundary keeps downstream comparisons honest.
pub fn preserve_whitespace(source: &str, translated: &str) -> String {
    if source.is_empty() {
        return translated.to_string();
    }

    let leading = source.len() - source.trim_start_matches(' ').len();
    let trailing = source.len() - source.trim_end_matches(' ').len();

    format!(
        "{}{}{}",
        " ".repeat(leading),
        translated.trim(),
        " ".repeat(trailing)
    )
}

fn truncate_for_log(text: &str) -> &str {
    let limit = 120;
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
