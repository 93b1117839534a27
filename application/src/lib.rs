//! Application layer for revchat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, ChunkStream, GatewayError, StreamHandle},
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    display_surface::{DisplaySurface, MemorySurface},
    markup_renderer::MarkupRenderer,
    progress::{ExchangeProgressNotifier, NoExchangeProgress},
};
pub use use_cases::list_models::{ListModelsError, ListModelsUseCase};
pub use use_cases::send_message::{
    ExchangeOutcome, SendMessageError, SendMessageInput, SendMessageUseCase,
};
