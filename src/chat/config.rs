//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::env;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{API_URL_ENV, DEFAULT_API_URL, normalize_base_url};
use crate::error::{Error, Result};

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for the chatline tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the chat backend.
    #[arrrg(
        optional,
        "API base URL (default: $CHATLINE_API_URL or http://localhost:8000/api/v1)",
        "URL"
    )]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments and the environment with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the chat backend, without a trailing slash.
    pub api_url: String,

    /// Per-request timeout handed to the HTTP client.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            use_color: true,
        }
    }

    /// Resolves the configuration from arguments and the process environment.
    ///
    /// The API URL comes from `--api-url`, then `CHATLINE_API_URL`, then the
    /// built-in default.
    pub fn from_args(args: ChatArgs) -> Result<Self> {
        Self::resolve(args, env::var(API_URL_ENV).ok())
    }

    /// Resolves the configuration from arguments and an explicit environment
    /// value for the API URL.
    pub fn resolve(args: ChatArgs, env_api_url: Option<String>) -> Result<Self> {
        let api_url = args
            .api_url
            .or(env_api_url.filter(|url| !url.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout = match args.timeout {
            Some(0) => {
                return Err(Error::validation(
                    "timeout must be at least one second",
                    Some("timeout".to_string()),
                ));
            }
            Some(secs) => Duration::from_secs(secs),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(ChatConfig {
            api_url: normalize_base_url(&api_url)?,
            timeout,
            use_color: !args.no_color,
        })
    }

    /// Sets the API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}
