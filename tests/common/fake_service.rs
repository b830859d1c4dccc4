/*!
 * Local stand-ins for the remote translation service and file host
 */

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bipdf::app_config::{Config, TranslationProvider};
use bipdf::translation::DEFAULT_SEPARATOR;

use super::spawn_server;

pub const TEST_API_KEY: &str = "test-key";

/// How the fake chat completions endpoint answers
#[derive(Clone)]
pub enum FakeReply {
    /// Prefix every sentence with `ترجمة: `
    Translate,
    /// Answer with this status and a JSON error body
    Status(StatusCode),
}

#[derive(Clone)]
struct FakeState {
    reply: FakeReply,
    calls: Arc<AtomicUsize>,
}

/// A running fake chat completions service
pub struct FakeTranslationService {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
}

impl FakeTranslationService {
    pub async fn start(reply: FakeReply) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = FakeState {
            reply,
            calls: calls.clone(),
        };
        let router = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state);

        Self {
            addr: spawn_server(router).await,
            calls,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Default config pointed at this service
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.translation.provider = TranslationProvider::OpenAI;
        config.translation.set_api_key(TEST_API_KEY);
        let endpoint = self.endpoint();
        if let Some(provider) = config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == "openai")
        {
            provider.endpoint = endpoint;
            provider.timeout_secs = 10;
        }
        config
    }
}

async fn chat_completions(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TEST_API_KEY));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" }))).into_response();
    }

    match state.reply {
        FakeReply::Status(status) => {
            (status, Json(json!({ "error": { "message": "fake failure" } }))).into_response()
        }
        FakeReply::Translate => {
            let user = body["messages"][1]["content"].as_str().unwrap_or_default();
            let content = user
                .split(DEFAULT_SEPARATOR)
                .map(|sentence| format!("ترجمة: {}", sentence.trim()))
                .collect::<Vec<_>>()
                .join(&format!("\n{}\n", DEFAULT_SEPARATOR));

            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": content } }],
                "usage": { "prompt_tokens": 12, "completion_tokens": 8 }
            }))
            .into_response()
        }
    }
}

/// Serve `bytes` at `/files/doc.pdf`; every other path is a 404
pub async fn start_file_host(bytes: Vec<u8>) -> SocketAddr {
    let bytes = Arc::new(bytes);
    let router = Router::new().route(
        "/files/doc.pdf",
        get(move || {
            let bytes = bytes.clone();
            async move { (StatusCode::OK, bytes.as_ref().clone()) }
        }),
    );
    spawn_server(router).await
}
