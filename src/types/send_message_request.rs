use serde::{Deserialize, Serialize};

/// Body sent to `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageRequest {
    /// The user's message, exactly as typed.
    pub message: String,

    /// The chat this message belongs to.
    pub chat_id: String,
}

impl SendMessageRequest {
    /// Create a new request for the given chat.
    pub fn new(message: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chat_id: chat_id.into(),
        }
    }
}
