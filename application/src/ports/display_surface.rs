//! Display surface port
//!
//! A display surface holds the rendered content of the assistant message
//! currently being streamed.

/// Sink for rendered message content.
///
/// The streaming assembler only ever appends: it reads the current content,
/// extends it, and writes it back.
pub trait DisplaySurface: Send {
    /// Current rendered content.
    fn content(&self) -> String;

    /// Replace the rendered content.
    fn set_content(&mut self, content: String);

    /// Append rendered text after the existing content.
    fn append(&mut self, rendered: &str) {
        let mut content = self.content();
        content.push_str(rendered);
        self.set_content(content);
    }
}

/// In-memory surface, used for transcripts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    content: String,
    updates: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_content` calls so far.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl DisplaySurface for MemorySurface {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_extends_content() {
        let mut surface = MemorySurface::new();
        surface.append("<p>a</p>");
        surface.append("<p>b</p>");
        assert_eq!(surface.as_str(), "<p>a</p><p>b</p>");
        assert_eq!(surface.updates(), 2);
    }
}
