//! Locating JSON embedded in model output.
//!
//! Models often surround structured output with prose or markdown fences.
//! [`extract_json`] returns the first well-formed JSON value found anywhere in
//! the text instead of requiring the whole string to parse.

use serde_json::{Deserializer, Value};

/// Extract the first well-formed JSON value embedded in `text`.
///
/// A text that is itself a JSON document (including scalars) parses as-is.
/// Otherwise every `{` or `[` is tried as a starting point, in order, and the
/// first one that begins a complete value wins; trailing text after that value
/// is ignored. Returns `None` when nothing parses.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    trimmed
        .char_indices()
        .filter(|(_, c)| matches!(c, '{' | '['))
        .find_map(|(start, _)| first_value(&trimmed[start..]))
}

fn first_value(text: &str) -> Option<Value> {
    Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()
        .and_then(|result| result.ok())
}
