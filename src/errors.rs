/*!
 * Error types for the bipdf application.
 *
 * This module contains custom error types for each stage of the translation
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while pulling text out of a PDF
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// Every extraction strategy came back empty
    #[error("No text found in PDF")]
    Empty,
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The translation service answered with a non-success status
    #[error("Translation failed: {status}")]
    Service {
        /// HTTP status code returned by the service
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The service returned a different number of sentences than it was sent
    #[error("Translation count mismatch in batch {batch_index}: expected {expected} sentences, got {actual}")]
    CountMismatch {
        /// Zero-based batch index
        batch_index: usize,
        /// Sentences sent
        expected: usize,
        /// Sentences received
        actual: usize,
    },

    /// No API key configured for the active provider
    #[error("Translation API key is not configured for the {0} provider")]
    MissingApiKey(String),

    /// Transport or parsing error from the provider
    #[error("Provider error: {0}")]
    Provider(ProviderError),
}

impl From<ProviderError> for TranslationError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::ApiError { status_code, message } => Self::Service {
                status: status_code,
                body: message,
            },
            other => Self::Provider(other),
        }
    }
}

/// Errors that can occur while building the bilingual document
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Source and translation lists differ in length
    #[error("Cannot pair {sources} source sentences with {translations} translations")]
    PairCountMismatch { sources: usize, translations: usize },

    /// PDF serialization failed
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for ComposeError {
    fn from(error: lopdf::Error) -> Self {
        Self::Pdf(error.to_string())
    }
}

/// Errors that can occur while obtaining the source document
#[derive(Error, Debug)]
pub enum SourceError {
    /// Neither inline content nor a URL was supplied
    #[error("Either fileBase64 or fileUrl is required")]
    MissingInput,

    /// The document could not be fetched from its URL
    #[error("Failed to download PDF")]
    DownloadFailed(String),

    /// Inline content was not valid base64
    #[error("Invalid base64 content: {0}")]
    InvalidBase64(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error obtaining the source document
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Error extracting text
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Error from translation
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Error composing the output document
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        Self::Translation(error.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
