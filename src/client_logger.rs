//! Logging trait for chat backend operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every successful exchange passing through the [`ChatClient`].
//!
//! [`ChatClient`]: crate::ChatClient

use crate::types::{NewChatResponse, SendMessageRequest, SendMessageResponse};

/// A trait for logging chat backend operations.
///
/// Implement this trait to record the raw wire bodies exchanged with the
/// backend.  Failures are not reported here; they surface as [`Error`]s.
///
/// # Example
///
/// ```rust,ignore
/// use chatline::{ClientLogger, NewChatResponse, SendMessageRequest, SendMessageResponse};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_new_chat(&self, response: &NewChatResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "New chat: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
///
///     fn log_exchange(&self, request: &SendMessageRequest, response: &SendMessageResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "> {}", request.message).unwrap();
///         writeln!(file, "< {}", response.message).unwrap();
///     }
/// }
/// ```
///
/// [`Error`]: crate::Error
pub trait ClientLogger: Send + Sync {
    /// Log the response to a successful create-session call.
    fn log_new_chat(&self, response: &NewChatResponse);

    /// Log a successful send-message round trip.
    fn log_exchange(&self, request: &SendMessageRequest, response: &SendMessageResponse);
}
