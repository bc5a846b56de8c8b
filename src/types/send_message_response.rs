use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageResponse {
    /// The assistant's reply.
    pub message: String,

    /// Echo of the chat id; not consulted by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

impl From<SendMessageResponse> for Message {
    fn from(response: SendMessageResponse) -> Self {
        Message::assistant(response.message)
    }
}
