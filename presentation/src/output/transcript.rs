//! HTML transcript of a chat session
//!
//! Every finished exchange is appended to the transcript as a `<section>`
//! holding the escaped prompt and the rendered reply.

use chrono::Local;
use html_escape::{encode_double_quoted_attribute, encode_text};
use revchat_application::ExchangeOutcome;
use revchat_domain::{Conversation, ExchangeState};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Appends exchanges to an HTML file.
pub struct TranscriptWriter {
    file: File,
}

impl TranscriptWriter {
    /// Open (or create) the transcript in append mode, creating parent dirs.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Transcript opened at {}", path.display());
        Ok(Self { file })
    }

    /// Append one exchange. Write failures are logged, not returned.
    pub fn record(&mut self, conversation: &Conversation, prompt: &str, outcome: &ExchangeOutcome) {
        let entry = format_entry(conversation, prompt, outcome);
        if let Err(e) = self.file.write_all(entry.as_bytes()) {
            warn!("Failed to write transcript entry: {}", e);
        }
    }
}

fn format_entry(conversation: &Conversation, prompt: &str, outcome: &ExchangeOutcome) -> String {
    let conversation_id = conversation.id().map(|id| id.as_str()).unwrap_or("");
    let mut entry = format!(
        "<section class=\"exchange\" data-conversation=\"{}\" data-model=\"{}\" data-state=\"{}\">\n",
        encode_double_quoted_attribute(conversation_id),
        encode_double_quoted_attribute(conversation.model().as_str()),
        outcome.state
    );
    entry.push_str(&format!(
        "<time>{}</time>\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    entry.push_str(&format!(
        "<div class=\"user\">{}</div>\n",
        encode_text(prompt)
    ));
    entry.push_str(&format!(
        "<div class=\"assistant\">{}</div>\n",
        outcome.rendered
    ));
    if outcome.state == ExchangeState::Failed {
        entry.push_str(&format!(
            "<div class=\"error\">{}</div>\n",
            encode_text(outcome.error.as_deref().unwrap_or("failed"))
        ));
    }
    entry.push_str("</section>\n");
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use revchat_domain::ConversationId;

    fn completed(rendered: &str) -> ExchangeOutcome {
        ExchangeOutcome {
            state: ExchangeState::Completed,
            rendered: rendered.to_string(),
            chunks: 1,
            bytes: rendered.len(),
            assigned_id: None,
            error: None,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(encode_text("1 < 2 && 3 > 2"), "1 &lt; 2 &amp;&amp; 3 &gt; 2");
        assert_eq!(
            encode_double_quoted_attribute(r#"say "hi""#),
            "say &quot;hi&quot;"
        );
    }

    #[test]
    fn test_attributes_are_escaped() {
        let conversation = Conversation::new(revchat_domain::Model::Custom(
            r#"model"<x>"#.to_string(),
        ));
        let entry = format_entry(&conversation, "hi", &completed("<p>ok</p>"));
        assert!(entry.contains(r#"data-model="model&quot;&lt;x&gt;""#));
    }

    #[test]
    fn test_entry_escapes_prompt_but_not_reply() {
        let mut conversation = Conversation::default();
        conversation.adopt_id(ConversationId::try_new("abc123").unwrap());

        let entry = format_entry(&conversation, "is 1 < 2?", &completed("<p>Yes</p>\n"));

        assert!(entry.contains("data-conversation=\"abc123\""));
        assert!(entry.contains("data-state=\"completed\""));
        assert!(entry.contains("<div class=\"user\">is 1 &lt; 2?</div>"));
        assert!(entry.contains("<div class=\"assistant\"><p>Yes</p>\n</div>"));
        assert!(!entry.contains("class=\"error\""));
    }

    #[test]
    fn test_failed_entry_includes_error() {
        let outcome = ExchangeOutcome {
            state: ExchangeState::Failed,
            error: Some("Server returned 503".to_string()),
            ..completed("")
        };
        let entry = format_entry(&Conversation::default(), "hi", &outcome);
        assert!(entry.contains("<div class=\"error\">Server returned 503</div>"));
    }

    #[test]
    fn test_record_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat.html");

        let conversation = Conversation::default();
        TranscriptWriter::open(&path)
            .unwrap()
            .record(&conversation, "first", &completed("<p>1</p>"));
        TranscriptWriter::open(&path)
            .unwrap()
            .record(&conversation, "second", &completed("<p>2</p>"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("<section").count(), 2);
        assert!(content.find("first").unwrap() < content.find("second").unwrap());
    }
}
