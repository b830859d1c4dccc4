/*!
 * Sentence translation using AI providers.
 *
 * This module turns extracted text into translated sentences. It is split
 * into several submodules:
 *
 * - `segmenter`: Sentence splitting and fixed-size batching
 * - `core`: Translation service definition and per-batch translation
 * - `batch`: Concurrent batch processing with ordered reassembly
 */

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::core::{BatchTranslation, TokenUsageStats, TranslationOptions, TranslationService};
pub use self::segmenter::{SentenceBatch, DEFAULT_BATCH_SIZE, DEFAULT_SEPARATOR};

// Submodules
pub mod batch;
pub mod core;
pub mod segmenter;
