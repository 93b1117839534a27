//! Per-exchange streaming state.

use crate::core::error::DomainError;
use std::fmt;

/// Lifecycle of one request/response exchange.
///
/// `Idle → Requesting → Streaming → Completed`; `Requesting` and `Streaming`
/// may move to `Failed`. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    #[default]
    Idle,
    Requesting,
    Streaming,
    Completed,
    Failed,
}

impl ExchangeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeState::Idle => "idle",
            ExchangeState::Requesting => "requesting",
            ExchangeState::Streaming => "streaming",
            ExchangeState::Completed => "completed",
            ExchangeState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExchangeState::Completed | ExchangeState::Failed)
    }

    fn can_transition_to(&self, next: ExchangeState) -> bool {
        use ExchangeState::*;
        matches!(
            (self, next),
            (Idle, Requesting)
                | (Requesting, Streaming)
                | (Requesting, Failed)
                | (Streaming, Completed)
                | (Streaming, Failed)
        )
    }
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one in-flight exchange: its lifecycle plus the rendered output
/// accumulated so far.
#[derive(Debug, Default)]
pub struct StreamSession {
    state: ExchangeState,
    buffer: String,
    chunks: usize,
    bytes: usize,
}

impl StreamSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn rendered(&self) -> &str {
        &self.buffer
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    pub fn bytes(&self) -> usize {
        self.bytes
    }

    fn transition(&mut self, next: ExchangeState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.state.as_str(),
                to: next.as_str(),
            });
        }
        self.state = next;
        Ok(())
    }

    pub fn begin_request(&mut self) -> Result<(), DomainError> {
        self.transition(ExchangeState::Requesting)
    }

    pub fn begin_streaming(&mut self) -> Result<(), DomainError> {
        self.transition(ExchangeState::Streaming)
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition(ExchangeState::Completed)
    }

    pub fn fail(&mut self) -> Result<(), DomainError> {
        self.transition(ExchangeState::Failed)
    }

    /// Count a raw chunk read from the body.
    pub fn record_chunk(&mut self, len: usize) {
        self.chunks += 1;
        self.bytes += len;
    }

    /// Append rendered output. Only valid while streaming.
    pub fn append(&mut self, rendered: &str) -> Result<(), DomainError> {
        if self.state != ExchangeState::Streaming {
            return Err(DomainError::InvalidTransition {
                from: self.state.as_str(),
                to: ExchangeState::Streaming.as_str(),
            });
        }
        self.buffer.push_str(rendered);
        Ok(())
    }

    /// Consume the session, returning the accumulated output.
    pub fn into_rendered(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut session = StreamSession::new();
        assert_eq!(session.state(), ExchangeState::Idle);
        session.begin_request().unwrap();
        session.begin_streaming().unwrap();
        session.record_chunk(5);
        session.append("<p>Hi</p>").unwrap();
        session.complete().unwrap();

        assert!(session.state().is_terminal());
        assert_eq!(session.chunks(), 1);
        assert_eq!(session.bytes(), 5);
        assert_eq!(session.into_rendered(), "<p>Hi</p>");
    }

    #[test]
    fn test_failure_from_requesting_and_streaming() {
        let mut session = StreamSession::new();
        session.begin_request().unwrap();
        session.fail().unwrap();
        assert_eq!(session.state(), ExchangeState::Failed);

        let mut session = StreamSession::new();
        session.begin_request().unwrap();
        session.begin_streaming().unwrap();
        session.fail().unwrap();
        assert_eq!(session.state(), ExchangeState::Failed);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut session = StreamSession::new();
        session.begin_request().unwrap();
        session.fail().unwrap();
        assert!(session.begin_streaming().is_err());
        assert!(session.complete().is_err());
        assert!(session.fail().is_err());
    }

    #[test]
    fn test_append_requires_streaming() {
        let mut session = StreamSession::new();
        assert!(session.append("x").is_err());
        session.begin_request().unwrap();
        assert!(session.append("x").is_err());
        assert_eq!(session.rendered(), "");
    }

    #[test]
    fn test_cannot_skip_requesting() {
        let mut session = StreamSession::new();
        assert_eq!(
            session.begin_streaming(),
            Err(DomainError::InvalidTransition {
                from: "idle",
                to: "streaming"
            })
        );
    }
}
