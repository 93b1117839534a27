//! Terminal display surface

use revchat_application::DisplaySurface;
use std::io::{self, Stdout, Write};
use tracing::warn;

/// Display surface that streams rendered content to a terminal.
///
/// Each `set_content` writes only the part that was not on screen yet, so a
/// reply appears progressively as chunks arrive.
pub struct TerminalSurface<W: Write + Send = Stdout> {
    content: String,
    out: W,
}

impl TerminalSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            content: String::new(),
            out,
        }
    }

    /// End the reply on its own line.
    pub fn finish(&mut self) {
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.write("\n");
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> DisplaySurface for TerminalSurface<W> {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: String) {
        match content.strip_prefix(self.content.as_str()) {
            Some(suffix) => {
                let suffix = suffix.to_string();
                self.write(&suffix);
            }
            None => {
                // Not an extension of what is on screen: redraw below it.
                let redraw = format!("\n{}", content);
                self.write(&redraw);
            }
        }
        self.content = content;
    }

    fn append(&mut self, rendered: &str) {
        self.write(rendered);
        self.content.push_str(rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_append_writes_only_new_text() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.append("<p>Hel");
        surface.append("lo</p>");
        assert_eq!(surface.content(), "<p>Hello</p>");
        assert_eq!(written(surface), "<p>Hello</p>");
    }

    #[test]
    fn test_set_content_extension_writes_suffix() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_content("abc".to_string());
        surface.set_content("abcdef".to_string());
        assert_eq!(written(surface), "abcdef");
    }

    #[test]
    fn test_set_content_replacement_redraws() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_content("abc".to_string());
        surface.set_content("xyz".to_string());
        assert_eq!(written(surface), "abc\nxyz");
    }

    #[test]
    fn test_finish_adds_trailing_newline_once() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.append("<p>Hi</p>");
        surface.finish();
        assert_eq!(written(surface), "<p>Hi</p>\n");

        let mut surface = TerminalSurface::new(Vec::new());
        surface.append("<p>Hi</p>\n");
        surface.finish();
        assert_eq!(written(surface), "<p>Hi</p>\n");

        let mut empty = TerminalSurface::new(Vec::new());
        empty.finish();
        assert_eq!(written(empty), "");
    }
}
