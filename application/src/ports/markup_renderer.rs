//! Markup renderer port

/// Converts streamed text from the lightweight markup the server emits
/// (Markdown) into the display format.
///
/// Implementations must be pure: the same input always renders the same way.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}
