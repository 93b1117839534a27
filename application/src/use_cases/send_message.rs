//! Send Message use case.
//!
//! Sends one user message and assembles the streamed response onto a
//! [`DisplaySurface`] as chunks arrive.
//!
//! For every chunk the assembler:
//! 1. decodes the bytes as UTF-8 (chunk-local, lossy)
//! 2. strips a leading control token, adopting it as the conversation
//!    identifier if the conversation has none yet
//! 3. renders the remaining text with the [`MarkupRenderer`]
//! 4. appends the result to the surface
//!
//! Gateway and stream failures end the exchange in
//! [`ExchangeState::Failed`] but are not returned as errors: whatever was
//! rendered before the failure stays on the surface.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
};
use crate::ports::display_surface::DisplaySurface;
use crate::ports::markup_renderer::MarkupRenderer;
use crate::ports::progress::{ExchangeProgressNotifier, NoExchangeProgress};
use revchat_domain::util::preview;
use revchat_domain::{
    ApiKey, Conversation, ConversationId, DomainError, ExchangeState, RequestOptions,
    StreamSession, UserMessage, scan_chunk,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent an exchange from starting.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SendMessageError {
    /// No API key is configured; the caller should prompt for one.
    #[error("An API key is required before sending messages")]
    MissingCredential,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the [`SendMessageUseCase`].
#[derive(Debug, Clone)]
pub struct SendMessageInput {
    /// Raw message text as typed by the user.
    pub message: String,
    pub credential: Option<ApiKey>,
    pub options: RequestOptions,
}

impl SendMessageInput {
    pub fn new(message: impl Into<String>, credential: Option<ApiKey>) -> Self {
        Self {
            message: message.into(),
            credential,
            options: RequestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// What happened during one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOutcome {
    /// Terminal state: `Completed` or `Failed`.
    pub state: ExchangeState,
    /// Everything appended to the surface during this exchange.
    pub rendered: String,
    pub chunks: usize,
    pub bytes: usize,
    /// Set when this exchange assigned the conversation identifier.
    pub assigned_id: Option<ConversationId>,
    /// Failure description when `state` is `Failed`.
    pub error: Option<String>,
}

impl ExchangeOutcome {
    pub fn is_completed(&self) -> bool {
        self.state == ExchangeState::Completed
    }
}

/// Use case for sending a message and streaming the reply.
///
/// At most one exchange runs per conversation: [`execute`](Self::execute)
/// borrows the [`Conversation`] mutably for the whole exchange.
#[derive(Clone)]
pub struct SendMessageUseCase {
    gateway: Arc<dyn ChatGateway>,
    renderer: Arc<dyn MarkupRenderer>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SendMessageUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, renderer: Arc<dyn MarkupRenderer>) -> Self {
        Self {
            gateway,
            renderer,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute without progress reporting.
    pub async fn execute(
        &self,
        conversation: &mut Conversation,
        input: SendMessageInput,
        surface: &mut dyn DisplaySurface,
    ) -> Result<ExchangeOutcome, SendMessageError> {
        self.execute_with_progress(conversation, input, surface, &NoExchangeProgress)
            .await
    }

    /// Execute, reporting progress through `progress`.
    pub async fn execute_with_progress(
        &self,
        conversation: &mut Conversation,
        input: SendMessageInput,
        surface: &mut dyn DisplaySurface,
        progress: &dyn ExchangeProgressNotifier,
    ) -> Result<ExchangeOutcome, SendMessageError> {
        let credential = input
            .credential
            .ok_or(SendMessageError::MissingCredential)?;
        let message = UserMessage::try_new(input.message)?;

        let request = conversation.request_for(&message, &input.options);
        let mut session = StreamSession::new();
        session.begin_request()?;

        info!(
            "Sending message to {} (conversation: {}): {}",
            request.model,
            request
                .conversation_id
                .as_ref()
                .map(|id| id.as_str())
                .unwrap_or("new"),
            preview(message.content(), 80)
        );
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::MessageSent,
            serde_json::json!({
                "model": request.model.as_str(),
                "conversation_id": request.conversation_id.as_ref().map(|id| id.as_str()),
                "message": message.content(),
            }),
        ));
        progress.on_request_started(&request.model);

        let mut handle = match self.gateway.open_stream(&request, &credential).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Request failed before streaming: {}", e);
                session.fail()?;
                return Ok(self.finish(session, None, Some(e), progress));
            }
        };
        session.begin_streaming()?;

        let mut assigned_id = None;
        let failure = loop {
            let bytes = match handle.read().await {
                None => break None,
                Some(Err(e)) => break Some(e),
                Some(Ok(bytes)) => bytes,
            };

            if session.chunks() == 0 {
                progress.on_first_chunk();
            }
            session.record_chunk(bytes.len());

            let decoded = String::from_utf8_lossy(&bytes);
            let scan = scan_chunk(&decoded);

            if let Some(token) = scan.token {
                let id = token.into_conversation_id();
                if conversation.adopt_id(id.clone()) {
                    info!("Conversation id assigned: {:?}", id.as_str());
                    self.conversation_logger.log(ConversationEvent::new(
                        ConversationEventKind::ConversationAssigned,
                        serde_json::json!({ "conversation_id": id.as_str() }),
                    ));
                    assigned_id = Some(id);
                } else {
                    debug!("Stripped control token <{}>, id already set", id);
                }
            }

            if scan.text.is_empty() {
                continue;
            }

            let rendered = self.renderer.render(&scan.text);
            session.append(&rendered)?;
            surface.append(&rendered);
        };
        handle.release();

        match &failure {
            Some(e) => {
                warn!(
                    "Stream failed after {} chunk(s): {}",
                    session.chunks(),
                    e
                );
                session.fail()?;
            }
            None => {
                debug!(
                    "Stream completed: {} chunk(s), {} byte(s)",
                    session.chunks(),
                    session.bytes()
                );
                session.complete()?;
            }
        }

        Ok(self.finish(session, assigned_id, failure, progress))
    }

    fn finish(
        &self,
        session: StreamSession,
        assigned_id: Option<ConversationId>,
        failure: Option<GatewayError>,
        progress: &dyn ExchangeProgressNotifier,
    ) -> ExchangeOutcome {
        let state = session.state();
        let chunks = session.chunks();
        let bytes = session.bytes();
        let error = failure.map(|e| e.to_string());

        match state {
            ExchangeState::Completed => self.conversation_logger.log(ConversationEvent::new(
                ConversationEventKind::ResponseCompleted,
                serde_json::json!({ "chunks": chunks, "bytes": bytes }),
            )),
            _ => self.conversation_logger.log(ConversationEvent::new(
                ConversationEventKind::ResponseFailed,
                serde_json::json!({ "chunks": chunks, "bytes": bytes, "error": error }),
            )),
        }
        progress.on_finished(state);

        ExchangeOutcome {
            state,
            rendered: session.into_rendered(),
            chunks,
            bytes,
            assigned_id,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::chat_gateway::StreamHandle;
    use crate::ports::display_surface::MemorySurface;
    use async_trait::async_trait;
    use revchat_domain::{ChatRequest, Model};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test doubles ====================

    enum Script {
        Reads(Vec<Result<Vec<u8>, GatewayError>>),
        Refuse(GatewayError),
    }

    /// Replays one script per `open_stream` call and records every request.
    #[derive(Default)]
    struct ScriptedGateway {
        scripts: Mutex<VecDeque<Script>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedGateway {
        fn with_chunks(chunks: &[&str]) -> Self {
            let gateway = Self::default();
            gateway.push_chunks(chunks);
            gateway
        }

        fn push_chunks(&self, chunks: &[&str]) {
            let reads = chunks.iter().map(|c| Ok(c.as_bytes().to_vec())).collect();
            self.scripts.lock().unwrap().push_back(Script::Reads(reads));
        }

        fn push(&self, script: Script) {
            self.scripts.lock().unwrap().push_back(script);
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatGateway for ScriptedGateway {
        async fn open_stream(
            &self,
            request: &ChatRequest,
            _credential: &ApiKey,
        ) -> Result<StreamHandle, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.scripts.lock().unwrap().pop_front() {
                Some(Script::Reads(reads)) => Ok(StreamHandle::from_reads(reads)),
                Some(Script::Refuse(e)) => Err(e),
                None => Ok(StreamHandle::from_reads(Vec::new())),
            }
        }

        async fn list_models(&self, _credential: &ApiKey) -> Result<Vec<Model>, GatewayError> {
            Ok(Model::known_models())
        }
    }

    /// Wraps each chunk in `[...]` so tests can tell rendered from raw text.
    struct BracketRenderer;

    impl MarkupRenderer for BracketRenderer {
        fn render(&self, text: &str) -> String {
            format!("[{}]", text)
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<ConversationEventKind>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.kind);
        }
    }

    fn key() -> Option<ApiKey> {
        Some(ApiKey::try_new("test-key").unwrap())
    }

    fn use_case(gateway: Arc<ScriptedGateway>) -> SendMessageUseCase {
        SendMessageUseCase::new(gateway, Arc::new(BracketRenderer))
    }

    // ==================== Control token handling ====================

    #[tokio::test]
    async fn chunks_without_token_render_verbatim() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["Hello", " world"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        let outcome = use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert!(outcome.is_completed());
        assert_eq!(surface.as_str(), "[Hello][ world]");
        assert_eq!(outcome.rendered, "[Hello][ world]");
        assert!(conversation.id().is_none());
        assert!(outcome.assigned_id.is_none());
        assert_eq!(outcome.chunks, 2);
        assert_eq!(outcome.bytes, 11);
    }

    #[tokio::test]
    async fn leading_token_sets_id_and_is_stripped() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<abc123>Hello"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        let outcome = use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(conversation.id().map(|id| id.as_str()), Some("abc123"));
        assert_eq!(outcome.assigned_id.as_ref().map(|id| id.as_str()), Some("abc123"));
        assert_eq!(surface.as_str(), "[Hello]");
    }

    #[tokio::test]
    async fn token_only_chunk_appends_nothing() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<abc123>", "Hi"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(surface.as_str(), "[Hi]");
        assert_eq!(surface.updates(), 1);
    }

    #[tokio::test]
    async fn later_token_is_stripped_but_does_not_overwrite_id() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<first>A", "<second>B"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(conversation.id().map(|id| id.as_str()), Some("first"));
        assert_eq!(surface.as_str(), "[A][B]");
    }

    #[tokio::test]
    async fn token_split_across_chunks_is_rendered_as_text() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<ab", "c123>Hi"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert!(conversation.id().is_none());
        assert_eq!(surface.as_str(), "[<ab][c123>Hi]");
    }

    #[tokio::test]
    async fn unclosed_bracket_is_ordinary_text() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<not a token"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert!(conversation.id().is_none());
        assert_eq!(surface.as_str(), "[<not a token]");
    }

    #[tokio::test]
    async fn empty_token_takes_the_only_assignment() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<>A", "<real>B"]));
        gateway.push_chunks(&["<real>C"]);
        let use_case = use_case(gateway.clone());
        let mut conversation = Conversation::default();

        let mut first = MemorySurface::new();
        let outcome = use_case
            .execute(&mut conversation, SendMessageInput::new("one", key()), &mut first)
            .await
            .unwrap();
        let mut second = MemorySurface::new();
        use_case
            .execute(&mut conversation, SendMessageInput::new("two", key()), &mut second)
            .await
            .unwrap();

        assert_eq!(conversation.id().map(|id| id.as_str()), Some(""));
        assert_eq!(outcome.assigned_id.map(|id| id.is_empty()), Some(true));
        assert_eq!(first.as_str(), "[A][B]");
        assert_eq!(second.as_str(), "[C]");

        let requests = gateway.requests();
        assert!(requests[0].conversation_id.is_none());
        assert_eq!(
            requests[1].conversation_id.as_ref().map(|id| id.as_str()),
            Some("")
        );
    }

    #[tokio::test]
    async fn cloned_use_case_shares_the_gateway() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<abc123>One"]));
        gateway.push_chunks(&["Two"]);
        let original = use_case(gateway.clone());
        let cloned = original.clone();
        let mut conversation = Conversation::default();

        let mut surface = MemorySurface::new();
        original
            .execute(&mut conversation, SendMessageInput::new("one", key()), &mut surface)
            .await
            .unwrap();
        cloned
            .execute(&mut conversation, SendMessageInput::new("two", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(surface.as_str(), "[One][Two]");
        assert_eq!(gateway.requests().len(), 2);
    }

    // ==================== Conversation continuity ====================

    #[tokio::test]
    async fn later_requests_carry_conversation_id() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<abc123>Hello"]));
        gateway.push_chunks(&["<abc123>Again"]);
        let use_case = use_case(gateway.clone());
        let mut conversation = Conversation::new(Model::Claude3Opus);

        let mut first = MemorySurface::new();
        use_case
            .execute(&mut conversation, SendMessageInput::new("one", key()), &mut first)
            .await
            .unwrap();
        let mut second = MemorySurface::new();
        let outcome = use_case
            .execute(&mut conversation, SendMessageInput::new("two", key()), &mut second)
            .await
            .unwrap();

        let requests = gateway.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].conversation_id.is_none());
        assert_eq!(
            requests[1].conversation_id.as_ref().map(|id| id.as_str()),
            Some("abc123")
        );
        assert_eq!(requests[1].model, Model::Claude3Opus);
        assert_eq!(requests[1].message, "two");
        assert!(requests[1].stream);
        assert!(outcome.assigned_id.is_none());
        assert_eq!(second.as_str(), "[Again]");
    }

    #[tokio::test]
    async fn request_options_are_forwarded() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["ok"]));
        let mut conversation = Conversation::default();
        let options = RequestOptions {
            client_type: Some("plus".to_string()),
            need_web_search: true,
            ..Default::default()
        };

        use_case(gateway.clone())
            .execute(
                &mut conversation,
                SendMessageInput::new("  padded  ", key()).with_options(options.clone()),
                &mut MemorySurface::new(),
            )
            .await
            .unwrap();

        let request = &gateway.requests()[0];
        assert_eq!(request.options, options);
        assert_eq!(request.message, "padded");
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn read_failure_keeps_rendered_content() {
        let gateway = Arc::new(ScriptedGateway::default());
        gateway.push(Script::Reads(vec![
            Ok(b"<abc123>Part one".to_vec()),
            Err(GatewayError::StreamError("connection reset".to_string())),
            Ok(b"never read".to_vec()),
        ]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        let outcome = use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome.state, ExchangeState::Failed);
        assert_eq!(surface.as_str(), "[Part one]");
        assert_eq!(outcome.rendered, "[Part one]");
        assert!(outcome.error.unwrap().contains("connection reset"));
        assert_eq!(conversation.id().map(|id| id.as_str()), Some("abc123"));
    }

    #[tokio::test]
    async fn refused_request_fails_without_touching_surface() {
        let gateway = Arc::new(ScriptedGateway::default());
        gateway.push(Script::Refuse(GatewayError::InvalidCredential));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();
        surface.set_content("previous".to_string());

        let outcome = use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(outcome.state, ExchangeState::Failed);
        assert_eq!(outcome.chunks, 0);
        assert_eq!(surface.as_str(), "previous");
        assert_eq!(surface.updates(), 1);
    }

    #[tokio::test]
    async fn missing_credential_never_calls_gateway() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["unused"]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        let result = use_case(gateway.clone())
            .execute(&mut conversation, SendMessageInput::new("hi", None), &mut surface)
            .await;

        assert_eq!(result, Err(SendMessageError::MissingCredential));
        assert!(gateway.requests().is_empty());
        assert_eq!(surface.updates(), 0);
    }

    #[tokio::test]
    async fn blank_message_is_rejected_before_sending() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["unused"]));
        let mut conversation = Conversation::default();

        let result = use_case(gateway.clone())
            .execute(
                &mut conversation,
                SendMessageInput::new("   ", key()),
                &mut MemorySurface::new(),
            )
            .await;

        assert_eq!(
            result,
            Err(SendMessageError::Domain(DomainError::EmptyMessage))
        );
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let gateway = Arc::new(ScriptedGateway::default());
        gateway.push(Script::Reads(vec![Ok(vec![b'o', b'k', 0xff])]));
        let mut conversation = Conversation::default();
        let mut surface = MemorySurface::new();

        use_case(gateway)
            .execute(&mut conversation, SendMessageInput::new("hi", key()), &mut surface)
            .await
            .unwrap();

        assert_eq!(surface.as_str(), "[ok\u{fffd}]");
    }

    // ==================== Logging & progress ====================

    #[tokio::test]
    async fn conversation_events_are_logged() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["<abc123>Hello"]));
        let logger = Arc::new(RecordingLogger::default());
        let mut conversation = Conversation::default();

        use_case(gateway)
            .with_conversation_logger(logger.clone())
            .execute(
                &mut conversation,
                SendMessageInput::new("hi", key()),
                &mut MemorySurface::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                ConversationEventKind::MessageSent,
                ConversationEventKind::ConversationAssigned,
                ConversationEventKind::ResponseCompleted,
            ]
        );
    }

    #[derive(Default)]
    struct RecordingProgress {
        calls: Mutex<Vec<String>>,
    }

    impl ExchangeProgressNotifier for RecordingProgress {
        fn on_request_started(&self, model: &Model) {
            self.calls.lock().unwrap().push(format!("start:{}", model));
        }

        fn on_first_chunk(&self) {
            self.calls.lock().unwrap().push("first".to_string());
        }

        fn on_finished(&self, state: ExchangeState) {
            self.calls.lock().unwrap().push(format!("end:{}", state));
        }
    }

    #[tokio::test]
    async fn progress_sees_first_chunk_once() {
        let gateway = Arc::new(ScriptedGateway::with_chunks(&["a", "b", "c"]));
        let progress = RecordingProgress::default();
        let mut conversation = Conversation::new(Model::Claude3Haiku);

        use_case(gateway)
            .execute_with_progress(
                &mut conversation,
                SendMessageInput::new("hi", key()),
                &mut MemorySurface::new(),
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(
            *progress.calls.lock().unwrap(),
            vec![
                "start:claude-3-haiku-20240307".to_string(),
                "first".to_string(),
                "end:completed".to_string()
            ]
        );
    }
}
