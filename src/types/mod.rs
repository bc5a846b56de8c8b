// Public modules
pub mod chat_session;
pub mod message;
pub mod new_chat_response;
pub mod send_message_request;
pub mod send_message_response;

// Re-exports
pub use chat_session::{CREATE_FAILED_MESSAGE, ChatSession, DEGRADED_SESSION_ID};
pub use message::Message;
pub use new_chat_response::NewChatResponse;
pub use send_message_request::SendMessageRequest;
pub use send_message_response::SendMessageResponse;
