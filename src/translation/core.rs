/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which sends one
 * sentence batch per request to the configured provider and splits the reply
 * back into exactly one translation per source sentence.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::{Config, TranslationProvider};
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::anthropic::Anthropic;
use crate::providers::openai::OpenAI;
use crate::providers::{CompletionRequest, Provider};

use super::segmenter::SentenceBatch;

/// Token usage statistics for tracking API consumption
#[derive(Debug, Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Number of requests made
    pub requests: usize,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl Default for TokenUsageStats {
    fn default() -> Self {
        Self::with_provider_info(String::new(), String::new())
    }
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            requests: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Add token usage numbers
    pub fn add_token_usage(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
    }

    /// Fold one batch result into the totals
    pub fn record(&mut self, batch: &BatchTranslation) {
        self.requests += 1;
        self.api_duration += batch.duration;
        self.add_token_usage(batch.prompt_tokens, batch.completion_tokens);
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token Usage Summary:\n\
             Provider: {}\n\
             Model: {}\n\
             Requests: {}\n\
             Prompt tokens: {}\n\
             Completion tokens: {}\n\
             Total tokens: {}\n\
             API request time: {:.2}s\n\
             Elapsed time: {:.2}s",
            self.provider,
            self.model,
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.api_duration.as_secs_f64(),
            self.start_time.elapsed().as_secs_f64()
        )
    }
}

/// Translation options for customizing the translation process
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    pub source_language: String,
    pub target_language: String,
    pub model: String,
    /// Template with `{source_language}`, `{target_language}` and `{separator}` placeholders
    pub system_prompt: String,
    pub separator: String,
    pub batch_size: usize,
    pub temperature: Option<f32>,
    pub max_tokens: u32,
    /// Maximum number of concurrent requests
    pub max_concurrent_requests: usize,
}

impl TranslationOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            model: config.translation.get_model(),
            system_prompt: config.translation.common.system_prompt.clone(),
            separator: config.translation.common.separator.clone(),
            batch_size: config.translation.common.batch_size,
            temperature: config.translation.common.temperature,
            max_tokens: config.translation.get_max_tokens(),
            max_concurrent_requests: config.translation.optimal_concurrent_requests(),
        }
    }
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Translations for one batch, in the batch's sentence order
#[derive(Debug, Clone)]
pub struct BatchTranslation {
    pub index: usize,
    pub translations: Vec<String>,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub duration: Duration,
}

/// Translation service for translating sentence batches
#[derive(Debug, Clone)]
pub struct TranslationService {
    provider: Arc<dyn Provider>,

    /// Options in effect for every batch
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create a service for the active provider in `config`
    pub fn new(config: &Config) -> Result<Self, TranslationError> {
        let translation = &config.translation;
        let api_key = translation.get_api_key();
        if api_key.trim().is_empty() {
            return Err(TranslationError::MissingApiKey(
                translation.provider.display_name().to_string(),
            ));
        }

        let endpoint = translation.get_endpoint();
        let timeout_secs = translation.get_timeout_secs();
        let provider: Arc<dyn Provider> = match translation.provider {
            TranslationProvider::OpenAI => Arc::new(OpenAI::new(api_key, endpoint, timeout_secs)),
            TranslationProvider::Anthropic => Arc::new(Anthropic::new(api_key, endpoint, timeout_secs)),
        };

        Ok(Self::with_provider(provider, TranslationOptions::from_config(config)))
    }

    /// Create a service around an existing provider
    pub fn with_provider(provider: Arc<dyn Provider>, options: TranslationOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// System prompt with language names and separator filled in
    pub fn system_prompt(&self) -> String {
        let language_name = |code: &str| {
            language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
        };

        self.options
            .system_prompt
            .replace("{source_language}", &language_name(&self.options.source_language))
            .replace("{target_language}", &language_name(&self.options.target_language))
            .replace("{separator}", &self.options.separator)
    }

    /// Translate one batch, failing unless exactly one translation comes
    /// back per source sentence
    pub async fn translate_batch(&self, batch: &SentenceBatch) -> Result<BatchTranslation, TranslationError> {
        if batch.is_empty() {
            return Ok(BatchTranslation {
                index: batch.index,
                translations: Vec::new(),
                prompt_tokens: None,
                completion_tokens: None,
                duration: Duration::ZERO,
            });
        }

        let request = CompletionRequest {
            model: self.options.model.clone(),
            system: self.system_prompt(),
            user: batch.joined(&self.options.separator),
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        debug!(
            "Sending batch {} ({} sentences) to {}",
            batch.index + 1,
            batch.len(),
            self.provider.name()
        );

        let start_time = Instant::now();
        let response = self.provider.complete(request).await?;
        let duration = start_time.elapsed();

        let translations = split_translations(&response.text, &self.options.separator, batch)?;

        Ok(BatchTranslation {
            index: batch.index,
            translations,
            prompt_tokens: response.prompt_tokens,
            completion_tokens: response.completion_tokens,
            duration,
        })
    }
}

/// Split a reply on `separator` and trim every piece.
///
/// The number of pieces must equal the batch length.
pub fn split_translations(
    content: &str,
    separator: &str,
    batch: &SentenceBatch,
) -> Result<Vec<String>, TranslationError> {
    let translations: Vec<String> = content
        .split(separator)
        .map(|piece| piece.trim().to_string())
        .collect();

    if translations.len() != batch.len() {
        warn!(
            "Batch {} returned {} translations for {} sentences",
            batch.index + 1,
            translations.len(),
            batch.len()
        );
        return Err(TranslationError::CountMismatch {
            batch_index: batch.index,
            expected: batch.len(),
            actual: translations.len(),
        });
    }

    Ok(translations)
}
