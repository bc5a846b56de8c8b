use serde::{Deserialize, Serialize};

use crate::types::ChatSession;

/// Body returned by `POST /chat/new`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewChatResponse {
    /// Identifier of the freshly created chat.
    pub chat_id: String,

    /// Greeting from the assistant.
    pub message: String,
}

impl From<NewChatResponse> for ChatSession {
    fn from(response: NewChatResponse) -> Self {
        ChatSession::with_greeting(response.chat_id, response.message)
    }
}
