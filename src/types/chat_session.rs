use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Session id used for a session that failed to be created on the backend.
pub const DEGRADED_SESSION_ID: &str = "-1";

/// Greeting placed in a degraded session.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create new chat";

/// One conversation with the assistant: an opaque id and its transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatSession {
    /// Opaque identifier assigned by the backend.
    pub id: String,

    /// Transcript in display order.
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// Create a session with an empty transcript.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
        }
    }

    /// Create a session seeded with a single assistant greeting.
    pub fn with_greeting(id: impl Into<String>, greeting: impl Into<String>) -> Self {
        let mut session = Self::new(id);
        session.messages.push(Message::assistant(greeting));
        session
    }

    /// The session shown when the backend could not create one.
    pub fn degraded() -> Self {
        Self::with_greeting(DEGRADED_SESSION_ID, CREATE_FAILED_MESSAGE)
    }

    /// Returns true if this session has no backend counterpart.
    pub fn is_degraded(&self) -> bool {
        self.id == DEGRADED_SESSION_ID
    }

    /// Returns the most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_session() {
        let session = ChatSession::with_greeting("abc", "Hi");
        assert_eq!(session.id, "abc");
        assert_eq!(session.messages, vec![Message::assistant("Hi")]);
        assert!(!session.is_degraded());
    }

    #[test]
    fn degraded_session() {
        let session = ChatSession::degraded();
        assert_eq!(session.id, "-1");
        assert!(session.is_degraded());
        assert_eq!(
            session.last_message(),
            Some(&Message::assistant("Failed to create new chat"))
        );
    }
}
