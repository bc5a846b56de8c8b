//! Integration tests for the HTTP gateway.
//!
//! Each test serves a stub of the chat backend on an ephemeral local port and
//! points a real `ChatClient` at it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use chatline::chat::{ChatController, SEND_FAILED_MESSAGE, SendOutcome};
use chatline::{
    ChatClient, ClientLogger, Gateway, Message, NewChatResponse, SendMessageRequest,
    SendMessageResponse,
};

/// A request as the stub backend saw it.
#[derive(Debug, Clone)]
struct Seen {
    path: &'static str,
    content_type: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    fn record(&self, path: &'static str, headers: &HeaderMap, body: &str) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        self.seen.lock().unwrap().push(Seen {
            path,
            content_type,
            body: body.to_string(),
        });
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn new_chat(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Json<Value> {
    backend.record("/chat/new", &headers, &body);
    Json(json!({"chat_id": "abc", "message": "Hi"}))
}

async fn chat(State(backend): State<Backend>, headers: HeaderMap, body: String) -> Json<Value> {
    backend.record("/chat", &headers, &body);
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let message = request["message"].as_str().unwrap_or_default();
    let reply = if message == "Hello" {
        "Hi there".to_string()
    } else {
        format!("echo: {message}")
    };
    Json(json!({"message": reply, "chat_id": request["chat_id"]}))
}

async fn failing() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn malformed() -> &'static str {
    "this is not json"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"chat_id": "late", "message": "too late"}))
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

async fn healthy_backend() -> (Backend, String) {
    let backend = Backend::default();
    let router = Router::new()
        .route("/api/v1/chat/new", post(new_chat))
        .route("/api/v1/chat", post(chat))
        .with_state(backend.clone());
    let base_url = serve(router).await;
    (backend, base_url)
}

async fn failing_backend() -> String {
    let router = Router::new()
        .route("/api/v1/chat/new", post(failing))
        .route("/api/v1/chat", post(failing));
    serve(router).await
}

#[tokio::test]
async fn create_session_wire_format() {
    let (backend, base_url) = healthy_backend().await;
    let client = ChatClient::new(&base_url).unwrap();

    let session = client.create_session().await.unwrap();

    assert_eq!(session.id, "abc");
    assert_eq!(session.messages, vec![Message::assistant("Hi")]);
    let seen = backend.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/chat/new");
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(seen[0].body, "");
}

#[tokio::test]
async fn send_message_wire_format() {
    let (backend, base_url) = healthy_backend().await;
    let client = ChatClient::new(&format!("{base_url}/")).unwrap();

    let reply = client.send_message("Hello", "abc").await.unwrap();

    assert_eq!(reply, Message::assistant("Hi there"));
    let seen = backend.seen();
    assert_eq!(seen[0].path, "/chat");
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({"message": "Hello", "chat_id": "abc"}));
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let client = ChatClient::new(&failing_backend().await).unwrap();

    let err = client.create_session().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(err.is_server_error());

    let err = client.send_message("Hello", "abc").await.unwrap_err();
    assert!(err.is_api());
}

#[tokio::test]
async fn missing_route_is_an_api_error() {
    let router = Router::new().route("/api/v1/chat/new", post(failing));
    let client = ChatClient::new(&serve(router).await).unwrap();

    let err = client.send_message("Hello", "abc").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn malformed_body_is_a_serialization_error() {
    let router = Router::new().route("/api/v1/chat/new", post(malformed));
    let client = ChatClient::new(&serve(router).await).unwrap();

    let err = client.create_session().await.unwrap_err();
    assert!(err.is_serialization());
}

#[tokio::test]
async fn unreachable_backend_is_a_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ChatClient::new(&format!("http://{addr}/api/v1")).unwrap();

    let err = client.create_session().await.unwrap_err();
    assert!(err.is_connection(), "unexpected error: {err}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn slow_backend_times_out() {
    let router = Router::new().route("/api/v1/chat/new", post(slow));
    let base_url = serve(router).await;
    let client = ChatClient::with_options(&base_url, Some(Duration::from_millis(200))).unwrap();

    let err = client.create_session().await.unwrap_err();
    assert!(err.is_timeout(), "unexpected error: {err}");
}

#[derive(Default)]
struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl ClientLogger for RecordingLogger {
    fn log_new_chat(&self, response: &NewChatResponse) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("new {}", response.chat_id));
    }

    fn log_exchange(&self, request: &SendMessageRequest, response: &SendMessageResponse) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} -> {}", request.message, response.message));
    }
}

#[tokio::test]
async fn logger_sees_successful_exchanges() {
    let (_backend, base_url) = healthy_backend().await;
    let logger = Arc::new(RecordingLogger::default());
    let client = ChatClient::new(&base_url)
        .unwrap()
        .with_logger(logger.clone());

    client.create_session().await.unwrap();
    client.send_message("Hello", "abc").await.unwrap();

    assert_eq!(
        *logger.lines.lock().unwrap(),
        vec!["new abc".to_string(), "Hello -> Hi there".to_string()]
    );
}

#[tokio::test]
async fn controller_over_http() {
    let (backend, base_url) = healthy_backend().await;
    let mut controller = ChatController::new(ChatClient::new(&base_url).unwrap());

    controller.create_session().await;
    assert_eq!(controller.send_message("Hello").await, SendOutcome::Replied);
    controller.set_input("  ");
    assert_eq!(controller.submit().await, SendOutcome::Skipped);

    assert_eq!(
        controller.messages(),
        &[
            Message::assistant("Hi"),
            Message::user("Hello"),
            Message::assistant("Hi there"),
        ]
    );
    assert!(!controller.is_busy());
    assert_eq!(backend.seen().len(), 2);
}

#[tokio::test]
async fn controller_absorbs_http_failures() {
    let mut controller = ChatController::new(ChatClient::new(&failing_backend().await).unwrap());

    controller.create_session().await;
    let session = controller.session().unwrap();
    assert!(session.is_degraded());
    assert_eq!(
        session.messages,
        vec![Message::assistant("Failed to create new chat")]
    );

    assert_eq!(controller.send_message("Hello").await, SendOutcome::Fallback);
    assert_eq!(
        &controller.messages()[1..],
        &[
            Message::user("Hello"),
            Message::assistant(SEND_FAILED_MESSAGE),
        ]
    );
    assert!(!controller.is_busy());
    assert_eq!(controller.last_error().and_then(|e| e.status_code()), Some(500));
}
