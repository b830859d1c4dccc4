/*!
 * # bipdf - Bilingual PDF translation with AI
 *
 * A Rust library that turns a PDF into a bilingual document: every extracted
 * sentence is followed by its AI translation.
 *
 * ## Features
 *
 * - Best-effort text extraction from PDF bytes (object model first, then raw
 *   literal strings, then raw stream blocks)
 * - Sentence segmentation and fixed-size batching
 * - Batch translation through AI providers:
 *   - OpenAI-compatible chat completions (hosted gateways included)
 *   - Anthropic API
 * - Strict per-batch sentence count validation
 * - Paginated bilingual PDF output
 * - HTTP endpoint and CLI front ends
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pdf_extractor`: Text extraction from PDF bytes
 * - `translation`: AI-powered translation services:
 *   - `translation::segmenter`: Sentence splitting and batching
 *   - `translation::core`: Core translation functionality
 *   - `translation::batch`: Concurrent batch processing
 * - `document_composer`: Bilingual layout and PDF serialization
 * - `file_utils`: Source resolution (base64, URL, disk) and output naming
 * - `app_controller`: Main application controller
 * - `server`: HTTP interface
 * - `session`: Auth session store and role resolution
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod document_composer;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pdf_extractor;
pub mod providers;
pub mod server;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslatedDocument};
pub use document_composer::BilingualDocument;
pub use errors::{AppError, ComposeError, ExtractionError, ProviderError, SourceError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use pdf_extractor::PdfTextExtractor;
pub use translation::{BatchTranslator, TranslationService};
