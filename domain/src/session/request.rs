//! Chat request payload.

use super::conversation::ConversationId;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Optional request fields understood by the server.
///
/// Each field is omitted from the JSON body unless set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    /// Upstream client pool to route to (e.g. `"plus"`, `"basic"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,
    /// Index of the upstream client within the pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_idx: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub need_web_search: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub need_artifacts: bool,
}

/// Body of `POST /api/v1/<provider>/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub stream: bool,
    pub model: Model,
    pub message: String,
    /// Present only once the server has assigned an identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    #[serde(flatten)]
    pub options: RequestOptions,
}
