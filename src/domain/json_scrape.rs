//! Best-effort JSON scraping from free-text model output.
//!
//! Models asked for "JSON only" still wrap their answer in Markdown fences
//! or lead-in prose often enough that a strict parse alone is not viable.
//! The scrape is two-stage: strict parse of the whole (fence-stripped) text
//! first, then the span from the first `{` to the last `}`.
//!
//! Known limitation, kept deliberately: the span scan is greedy and does not
//! match braces, so prose containing a stray `{` before or `}` after the
//! intended object can defeat it. Well-formed completions never hit this.

use serde_json::{Map, Value};

/// Removes Markdown code-fence delimiters (``` with optional language tag)
/// and surrounding backtick/whitespace noise.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            continue;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }
    cleaned.trim_matches(|c: char| c == '`' || c.is_whitespace()).to_string()
}

/// Extracts the first JSON object found in `text`, or `None`.
pub fn scrape_json(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }

    let cleaned = strip_code_fences(text);

    // Stage 1: the whole text is the object
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(cleaned.trim()) {
        return Some(value);
    }

    // Stage 2: greedy first-`{` / last-`}` span
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

/// Like [`scrape_json`] but yields the object's map directly.
pub fn scrape_object(text: &str) -> Option<Map<String, Value>> {
    match scrape_json(text)? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Scrapes `text` for a JSON object, producing `fallback()` when nothing
/// usable is found. The result is always well-formed; parse failures never
/// propagate.
pub fn scrape_json_or(text: &str, fallback: impl FnOnce() -> Value) -> Value {
    scrape_json(text).unwrap_or_else(fallback)
}
