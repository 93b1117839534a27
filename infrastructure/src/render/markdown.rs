//! Markdown renderers

use pulldown_cmark::{Options, Parser, html};
use revchat_application::MarkupRenderer;

/// Markdown → HTML with the GitHub-flavoured extensions chat replies use.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, Self::options());
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Passes text through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl MarkupRenderer for PlainRenderer {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph() {
        assert_eq!(MarkdownRenderer.render("Hello"), "<p>Hello</p>\n");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            MarkdownRenderer.render("**bold** and `code`"),
            "<p><strong>bold</strong> and <code>code</code></p>\n"
        );
    }

    #[test]
    fn test_strikethrough_enabled() {
        assert_eq!(MarkdownRenderer.render("~~old~~"), "<p><del>old</del></p>\n");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(MarkdownRenderer.render(""), "");
    }

    #[test]
    fn test_plain_passthrough() {
        assert_eq!(PlainRenderer.render("**x**"), "**x**");
    }
}
