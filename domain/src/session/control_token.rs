//! Control token extraction.
//!
//! The server announces the conversation identifier by prefixing the first
//! chunk of a streamed response with `<identifier>`. Detection is chunk-local:
//! a token split across two chunks is not recognised and flows through as
//! ordinary text.
//!
//! A chunk is only scanned when it starts with `<`. The first, shortest
//! `<...>` span whose interior stays on one line is taken as the token. When
//! the leading `<` is never closed on its own line, a later span in the same
//! chunk can still match.

use super::conversation::ConversationId;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^\r\n\x{2028}\x{2029}]*?>").expect("control token pattern is valid")
});

/// The interior of a matched `<...>` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlToken {
    value: String,
}

impl ControlToken {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The identifier this token carries. An empty `<>` gives an empty one.
    pub fn into_conversation_id(self) -> ConversationId {
        ConversationId::from_token(self.value)
    }
}

/// Result of scanning one decoded chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenScan<'a> {
    /// The matched token, if any.
    pub token: Option<ControlToken>,
    /// The chunk text with the matched span removed.
    pub text: Cow<'a, str>,
}

/// Scan a decoded chunk for a leading control token and strip it.
///
/// The span is stripped whether or not the caller ends up adopting it.
pub fn scan_chunk(chunk: &str) -> TokenScan<'_> {
    if !chunk.starts_with('<') {
        return TokenScan {
            token: None,
            text: Cow::Borrowed(chunk),
        };
    }

    let Some(found) = TOKEN_PATTERN.find(chunk) else {
        return TokenScan {
            token: None,
            text: Cow::Borrowed(chunk),
        };
    };

    let span = found.as_str();
    let token = ControlToken {
        value: span[1..span.len() - 1].to_string(),
    };

    let mut text = String::with_capacity(chunk.len() - span.len());
    text.push_str(&chunk[..found.start()]);
    text.push_str(&chunk[found.end()..]);

    TokenScan {
        token: Some(token),
        text: Cow::Owned(text),
    }
}
