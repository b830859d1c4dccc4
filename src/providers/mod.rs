/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the completion APIs used
 * to translate sentence batches:
 * - OpenAI: OpenAI-compatible chat completions (hosted AI gateways included)
 * - Anthropic: Anthropic messages API
 * - Mock: scripted in-process provider for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Provider-neutral completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier understood by the provider
    pub model: String,
    /// Instruction sent as the system prompt
    pub system: String,
    /// User message (the separator-joined batch)
    pub user: String,
    /// Sampling temperature, provider default when unset
    pub temperature: Option<f32>,
    /// Maximum completion tokens
    pub max_tokens: u32,
}

/// Provider-neutral completion response
#[derive(Debug, Clone, Default)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,
    /// Prompt tokens reported by the provider
    pub prompt_tokens: Option<u64>,
    /// Completion tokens reported by the provider
    pub completion_tokens: Option<u64>,
}

/// Common trait for all completion providers
///
/// Implementations must report non-success HTTP statuses as
/// `ProviderError::ApiError` so callers can surface the status code.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Complete a request using this provider
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError>;
}

pub mod anthropic;
pub mod mock;
pub mod openai;
