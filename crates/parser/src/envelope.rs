//! Unwrapping the completion text out of a Messages API response body.

use tracing::{error, warn};

/// Concatenate the `text` blocks of a response's `content` array.
///
/// Blocks are joined with `"\n"` in order; non-text blocks are ignored.
/// Any body without a `content` array yields an empty string.
pub fn extract_text(response: &serde_json::Value) -> String {
    let Some(blocks) = response.get("content").and_then(|c| c.as_array()) else {
        error!(
            body = %truncate(&response.to_string(), 200),
            "Response has no content array"
        );
        return String::new();
    };

    let mut parts: Vec<&str> = Vec::new();
    for (idx, block) in blocks.iter().enumerate() {
        if block.get("type").and_then(|t| t.as_str()) != Some("text") {
            continue;
        }
        match block.get("text").and_then(|t| t.as_str()) {
            Some(text) => parts.push(text),
            None => warn!(block = idx, "Text block without a text field"),
        }
    }

    parts.join("\n")
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
