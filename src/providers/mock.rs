/*!
 * Mock provider implementations for testing.
 *
 * This module provides a scripted provider that simulates different
 * translation service behaviors without network access:
 * - `MockProvider::translating()` - Translates every sentence of a batch
 * - `MockProvider::scripted()` - Returns canned replies in call order
 * - `MockProvider::failing()` - Always answers with an HTTP error status
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{CompletionRequest, CompletionResponse, Provider};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Split the user message on the separator and prefix every sentence
    Translating { separator: String, prefix: String },
    /// Return these replies in call order, the last one repeating
    Scripted(Vec<String>),
    /// Answer every request with this status code and body
    Failing { status_code: u16, body: String },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    /// Requests received so far, in arrival order
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    request_count: Arc<AtomicUsize>,
    /// Per-call delays, indexed by call number
    delays: Vec<Duration>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
            request_count: Arc::new(AtomicUsize::new(0)),
            delays: Vec::new(),
        }
    }

    /// Provider that "translates" each sentence to `[ar] <sentence>`
    pub fn translating(separator: impl Into<String>) -> Self {
        Self::new(MockBehavior::Translating {
            separator: separator.into(),
            prefix: "[ar] ".to_string(),
        })
    }

    /// Provider that returns canned replies
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MockBehavior::Scripted(replies.into_iter().map(Into::into).collect()))
    }

    /// Provider that always fails with `status_code`
    pub fn failing(status_code: u16) -> Self {
        Self::new(MockBehavior::Failing {
            status_code,
            body: format!("{{\"error\":\"mock failure {}\"}}", status_code),
        })
    }

    /// Delay the n-th call by `delays[n]`, calls past the end are not delayed
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copies of the requests made so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    fn reply_for(&self, call: usize, request: &CompletionRequest) -> Result<String, ProviderError> {
        match &self.behavior {
            MockBehavior::Translating { separator, prefix } => Ok(request
                .user
                .split(separator.as_str())
                .map(|sentence| format!("{}{}", prefix, sentence.trim()))
                .collect::<Vec<_>>()
                .join(&format!("\n{}\n", separator))),
            MockBehavior::Scripted(replies) => replies
                .get(call)
                .or_else(|| replies.last())
                .cloned()
                .ok_or_else(|| ProviderError::ParseError("No scripted reply".to_string())),
            MockBehavior::Failing { status_code, body } => Err(ProviderError::ApiError {
                status_code: *status_code,
                message: body.clone(),
            }),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        if let Some(delay) = self.delays.get(call) {
            tokio::time::sleep(*delay).await;
        }

        let text = self.reply_for(call, &request)?;

        Ok(CompletionResponse {
            prompt_tokens: Some(request.user.split_whitespace().count() as u64),
            completion_tokens: Some(text.split_whitespace().count() as u64),
            text,
        })
    }
}
