use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{
    ChatSession, Message, NewChatResponse, SendMessageRequest, SendMessageResponse,
};

/// Base URL used when neither the command line nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "CHATLINE_API_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The backend operations the session controller depends upon.
///
/// [`ChatClient`] is the HTTP implementation; tests substitute an in-memory
/// fake.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Ask the backend for a new chat and return it seeded with the greeting.
    async fn create_session(&self) -> Result<ChatSession>;

    /// Deliver `message` to the chat `chat_id` and return the assistant's reply.
    async fn send_message(&self, message: &str, chat_id: &str) -> Result<Message>;
}

/// HTTP client for the chat backend.
#[derive(Clone)]
pub struct ChatClient {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl ChatClient {
    /// Create a new client against `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every successful exchange.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Any non-success status is a failure; the body is kept but not parsed.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        match response.text().await {
            Ok(body) => Error::api(status_code, body),
            Err(e) => Error::http_client(
                format!("Failed to read error response: {}", e),
                Some(Box::new(e)),
            ),
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "posting to chat backend");
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.post_json_inner(&url, body).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::debug!(%url, error = %err, "chat backend request failed");
        }
        result
    }

    async fn post_json_inner<B, R>(&self, url: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(url).headers(self.default_headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<R>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl Gateway for ChatClient {
    async fn create_session(&self) -> Result<ChatSession> {
        let response: NewChatResponse = self.post_json::<(), _>("chat/new", None).await?;
        if let Some(logger) = &self.logger {
            logger.log_new_chat(&response);
        }
        Ok(ChatSession::from(response))
    }

    async fn send_message(&self, message: &str, chat_id: &str) -> Result<Message> {
        let request = SendMessageRequest::new(message, chat_id);
        let response: SendMessageResponse = self.post_json("chat", Some(&request)).await?;
        if let Some(logger) = &self.logger {
            logger.log_exchange(&request, &response);
        }
        Ok(Message::from(response))
    }
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Validate a base URL and strip its trailing slashes.
///
/// Only `http` and `https` URLs are accepted.
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(Error::validation(
            format!("unsupported URL scheme {scheme:?}"),
            Some("api_url".to_string()),
        )),
    }
}
