//! Chat application module for conversations with the assistant backend.
//!
//! This module provides the session controller and the REPL plumbing built
//! on top of the chatline gateway client.  It supports:
//!
//! - A single active session, created on startup and replaced on demand
//! - Optimistic insertion of the user's message before the reply arrives
//! - Fixed fallback messages when the backend fails
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: The session controller and its transitions
//! - [`commands`]: Slash command parsing

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{
    ChatController, ControllerState, PendingSend, SEND_FAILED_MESSAGE, SendOutcome, SessionStats,
    message_appended, reply_reconciled, session_created,
};
