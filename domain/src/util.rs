//! Text clipping for log lines and server error bodies.

use std::borrow::Cow;

/// Longest prefix of `text` that fits in `max_bytes` and ends on a char
/// boundary. Server error bodies are stored through this.
pub fn truncate_str(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// One-line preview of a user message for the log: newlines become spaces
/// and a clipped message ends in `...`.
pub fn preview(text: &str, max_bytes: usize) -> Cow<'_, str> {
    let clipped = truncate_str(text, max_bytes);
    let single_line = !clipped.contains(['\n', '\r']);
    match (clipped.len() == text.len(), single_line) {
        (true, true) => Cow::Borrowed(text),
        (whole, _) => {
            let mut line = clipped.replace(['\r', '\n'], " ");
            if !whole {
                line.push_str("...");
            }
            Cow::Owned(line)
        }
    }
}
