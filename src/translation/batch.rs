/*!
 * Batch translation processing.
 *
 * Sentence batches are translated with bounded concurrency and reassembled
 * by batch index, so the output order never depends on completion order.
 * The first failing batch aborts the run.
 */

use futures::stream::{self, StreamExt};
use log::{error, info};

use crate::errors::TranslationError;

use super::core::{TokenUsageStats, TranslationService};
use super::segmenter::{self, SentenceBatch};

/// Batch translator for processing sentence batches
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Maximum number of concurrent requests
    max_concurrent_requests: usize,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService) -> Self {
        Self {
            max_concurrent_requests: service.options.max_concurrent_requests.max(1),
            service,
        }
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Batch and translate `sentences`, returning one translation per sentence
    pub async fn translate_sentences(
        &self,
        sentences: &[String],
    ) -> Result<(Vec<String>, TokenUsageStats), TranslationError> {
        let batches = segmenter::batch(sentences, self.service.options.batch_size);
        self.translate_batches(&batches).await
    }

    /// Translate batches, concatenating their translations in batch order.
    ///
    /// Fails with the error of the lowest-indexed failing batch. Batches
    /// after it are never sent and batches still in flight are dropped.
    pub async fn translate_batches(
        &self,
        batches: &[SentenceBatch],
    ) -> Result<(Vec<String>, TokenUsageStats), TranslationError> {
        let mut token_stats = TokenUsageStats::with_provider_info(
            self.service.provider_name().to_string(),
            self.service.options.model.clone(),
        );

        let total_batches = batches.len();
        let service = &self.service;

        // `buffered` yields in submission order, so results arrive sorted by batch index
        let mut results = stream::iter(batches.iter().cloned())
            .map(|batch| async move {
                let result = service.translate_batch(&batch).await;
                match &result {
                    Ok(translated) => info!(
                        "Batch {}/{} translated in {:?}",
                        batch.index + 1,
                        total_batches,
                        translated.duration
                    ),
                    Err(e) => error!("Batch {}/{} failed: {}", batch.index + 1, total_batches, e),
                }
                result
            })
            .buffered(self.max_concurrent_requests);

        let mut translations = Vec::with_capacity(batches.iter().map(SentenceBatch::len).sum());
        while let Some(result) = results.next().await {
            let batch = result?;
            token_stats.record(&batch);
            translations.extend(batch.translations);
        }

        Ok((translations, token_stats))
    }
}
