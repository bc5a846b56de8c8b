//! Core chat session management.
//!
//! This module provides the [`ChatController`], which owns the single active
//! [`ChatSession`] and mediates every change to it: creation, optimistic
//! insertion of the user's message, reconciliation with the backend's reply,
//! and the fallbacks used when the backend fails.
//!
//! Gateway failures never escape the controller.  They are converted into
//! assistant-authored messages in the transcript and the busy flag is always
//! cleared afterwards.

use crate::client::Gateway;
use crate::error::{Error, Result};
use crate::observability::{
    MESSAGES_SENT, MESSAGES_SKIPPED, REPLY_FALLBACKS, SESSIONS_CREATED, SESSIONS_DEGRADED,
};
use crate::types::{ChatSession, Message};

/// Reply appended when the backend fails to answer a message.
pub const SEND_FAILED_MESSAGE: &str = "Sorry, I couldn't process your request. Please try again.";

/// Whether a gateway call is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// No gateway call is outstanding.
    #[default]
    Idle,
    /// A create-session or send-message call is outstanding.
    Busy,
}

/// What [`ChatController::send_message`] did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The input was blank or no session was active; nothing changed.
    Skipped,
    /// The backend replied and the reply was appended.
    Replied,
    /// The backend failed and the apology was appended.
    Fallback,
}

/// A message that has been optimistically inserted and awaits its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// The text sent, exactly as the user typed it.
    pub text: String,
    /// The id of the session the text was appended to.
    pub chat_id: String,
}

/// Aggregated stats for the active session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// The active session's id, if a session exists.
    pub session_id: Option<String>,
    /// True if the active session is the degraded placeholder.
    pub degraded: bool,
    /// The number of messages in the transcript.
    pub message_count: usize,
    /// Messages authored by the user.
    pub user_messages: usize,
    /// Messages authored by the assistant, fallbacks included.
    pub assistant_messages: usize,
    /// Exchanges in this session that ended in the fallback reply.
    pub failed_exchanges: u64,
    /// True while a gateway call is outstanding.
    pub busy: bool,
}

/// Resolve a create-session result into the session to display.
pub fn session_created(result: Result<ChatSession>) -> ChatSession {
    result.unwrap_or_else(|_| ChatSession::degraded())
}

/// Append `message` to `session`.
pub fn message_appended(mut session: ChatSession, message: Message) -> ChatSession {
    session.messages.push(message);
    session
}

/// Append the backend's reply, or the apology if there is none.
pub fn reply_reconciled(session: ChatSession, reply: Result<Message>) -> ChatSession {
    let message = reply.unwrap_or_else(|_| Message::assistant(SEND_FAILED_MESSAGE));
    message_appended(session, message)
}

fn update(slot: &mut Option<ChatSession>, f: impl FnOnce(ChatSession) -> ChatSession) {
    *slot = slot.take().map(f);
}

/// Marks the controller busy for as long as it lives.
struct BusyGuard<'a> {
    state: &'a mut ControllerState,
}

impl<'a> BusyGuard<'a> {
    fn enter(state: &'a mut ControllerState) -> Self {
        *state = ControllerState::Busy;
        Self { state }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.state = ControllerState::Idle;
    }
}

/// Owner of the single active chat session.
///
/// The backend is reached only through the injected [`Gateway`], so tests
/// can drive every transition with a fake.
pub struct ChatController<G: Gateway> {
    gateway: G,
    session: Option<ChatSession>,
    state: ControllerState,
    input: String,
    last_error: Option<Error>,
    failed_exchanges: u64,
    rendered: usize,
}

impl<G: Gateway> ChatController<G> {
    /// Creates a controller with no session.  Call
    /// [`create_session`](Self::create_session) to start one.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            session: None,
            state: ControllerState::Idle,
            input: String::new(),
            last_error: None,
            failed_exchanges: 0,
            rendered: 0,
        }
    }

    /// Replaces the active session with a fresh one from the backend.
    ///
    /// If the backend fails, the replacement is the degraded session whose
    /// only message reports the failure.  Either way the controller is idle
    /// when this returns.
    pub async fn create_session(&mut self) {
        let created = {
            let _busy = BusyGuard::enter(&mut self.state);
            self.gateway.create_session().await
        };
        self.finish_create(created);
    }

    fn finish_create(&mut self, created: Result<ChatSession>) {
        match &created {
            Ok(session) => {
                SESSIONS_CREATED.click();
                tracing::info!(chat_id = %session.id, "chat session created");
                self.last_error = None;
            }
            Err(err) => {
                SESSIONS_DEGRADED.click();
                tracing::warn!(error = %err, "error creating new chat");
                self.last_error = Some(err.clone());
            }
        }
        self.session = Some(session_created(created));
        self.failed_exchanges = 0;
        self.rendered = 0;
        self.state = ControllerState::Idle;
    }

    /// Sends `text` to the backend and appends the reply.
    ///
    /// Blank text, or the absence of a session, makes this a no-op.
    /// Otherwise the user's message is appended before the backend is
    /// contacted, and it stays in the transcript whatever the outcome.
    pub async fn send_message(&mut self, text: &str) -> SendOutcome {
        let Some(pending) = self.begin_send(text) else {
            return SendOutcome::Skipped;
        };
        let reply = {
            let _busy = BusyGuard::enter(&mut self.state);
            self.gateway
                .send_message(&pending.text, &pending.chat_id)
                .await
        };
        self.finish_send(&pending, reply)
    }

    /// Performs the optimistic half of a send.
    ///
    /// Appends the user's message, clears the pending input and marks the
    /// controller busy.  Returns `None`, changing nothing, when the text is
    /// blank or no session is active.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let chat_id = match &self.session {
            Some(session) if !text.trim().is_empty() => session.id.clone(),
            _ => {
                MESSAGES_SKIPPED.click();
                return None;
            }
        };
        update(&mut self.session, |session| {
            message_appended(session, Message::user(text))
        });
        self.input.clear();
        self.state = ControllerState::Busy;
        MESSAGES_SENT.click();
        Some(PendingSend {
            text: text.to_string(),
            chat_id,
        })
    }

    /// Reconciles a pending send with the backend's answer and goes idle.
    pub fn finish_send(&mut self, pending: &PendingSend, reply: Result<Message>) -> SendOutcome {
        let outcome = match &reply {
            Ok(_) => {
                tracing::debug!(chat_id = %pending.chat_id, "reply received");
                self.last_error = None;
                SendOutcome::Replied
            }
            Err(err) => {
                REPLY_FALLBACKS.click();
                tracing::warn!(chat_id = %pending.chat_id, error = %err, "error sending message");
                self.last_error = Some(err.clone());
                self.failed_exchanges += 1;
                SendOutcome::Fallback
            }
        };
        update(&mut self.session, |session| reply_reconciled(session, reply));
        self.state = ControllerState::Idle;
        outcome
    }

    /// Sends whatever is in the pending input.
    pub async fn submit(&mut self) -> SendOutcome {
        let text = self.input.clone();
        self.send_message(&text).await
    }

    /// Replaces the pending input.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// The pending input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// The active session's transcript; empty when there is no session.
    pub fn messages(&self) -> &[Message] {
        self.session
            .as_ref()
            .map(|session| session.messages.as_slice())
            .unwrap_or_default()
    }

    /// Returns messages appended since the last call, oldest first.
    ///
    /// Replacing the session starts over from its first message.
    pub fn take_unrendered(&mut self) -> Vec<Message> {
        let messages = self.messages();
        let total = messages.len();
        let fresh = messages[self.rendered.min(total)..].to_vec();
        self.rendered = total;
        fresh
    }

    /// The current state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// True while a gateway call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.state == ControllerState::Busy
    }

    /// The error absorbed by the most recent gateway call, if it failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// The injected gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        let messages = self.messages();
        let user_messages = messages.iter().filter(|m| m.is_user).count();
        SessionStats {
            session_id: self.session.as_ref().map(|s| s.id.clone()),
            degraded: self.session.as_ref().is_some_and(ChatSession::is_degraded),
            message_count: messages.len(),
            user_messages,
            assistant_messages: messages.len() - user_messages,
            failed_exchanges: self.failed_exchanges,
            busy: self.is_busy(),
        }
    }
}
