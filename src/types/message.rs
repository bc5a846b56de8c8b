use serde::{Deserialize, Serialize};

/// A single entry in a chat transcript.
///
/// Messages are immutable once created; a transcript only ever grows by
/// appending new ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// The text of the message, shown verbatim.
    pub content: String,

    /// True if the user wrote this message, false for the assistant.
    #[serde(rename = "isUser")]
    pub is_user: bool,
}

impl Message {
    /// Create a message authored by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
        }
    }

    /// Create a message authored by the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
        }
    }
}
