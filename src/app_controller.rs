use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::document_composer::BilingualDocument;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::pdf_extractor::PdfTextExtractor;
use crate::translation::{segmenter, BatchTranslator, TokenUsageStats, TranslationService};

// @module: Application controller for the PDF translation pipeline

/// Result of translating one document
#[derive(Debug, Clone)]
pub struct TranslatedDocument {
    // @field: Serialized bilingual PDF
    pub pdf_bytes: Vec<u8>,
    // @field: `translated_<name>`
    pub file_name: String,
    pub sentence_count: usize,
    pub page_count: usize,
    pub token_usage: TokenUsageStats,
}

/// Main application controller: extract, segment, translate, compose
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Batch translator over the configured provider
    translator: BatchTranslator,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let service = TranslationService::new(&config)?;
        Ok(Self::with_service(config, service))
    }

    // @method: Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self {
            translator: BatchTranslator::new(service),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline on PDF bytes. Any stage failure aborts the
    /// document; there is no partial output.
    pub async fn translate_document(
        &self,
        pdf_bytes: &[u8],
        file_name: Option<&str>,
    ) -> Result<TranslatedDocument, AppError> {
        let start_time = Instant::now();

        let extracted = PdfTextExtractor::extract(pdf_bytes)?;
        debug!(
            "Extracted {} characters using {:?}",
            extracted.text.len(),
            extracted.method
        );

        let sentences = segmenter::segment(&extracted.text);
        info!(
            "Translating {} sentences in batches of {}",
            sentences.len(),
            self.config.translation.common.batch_size
        );

        let (translations, token_usage) = self.translator.translate_sentences(&sentences).await?;

        let document = BilingualDocument::compose(&sentences, &translations, &self.config.layout)?;
        let pdf_bytes = document.to_pdf_bytes()?;

        info!(
            "Document translated in {:.2}s: {} sentences on {} pages",
            start_time.elapsed().as_secs_f64(),
            sentences.len(),
            document.page_count()
        );

        Ok(TranslatedDocument {
            pdf_bytes,
            file_name: FileManager::output_file_name(file_name),
            sentence_count: sentences.len(),
            page_count: document.page_count(),
            token_usage,
        })
    }

    /// Resolve inline or remote input, then translate it
    pub async fn translate_source(
        &self,
        file_base64: Option<&str>,
        file_url: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<TranslatedDocument, AppError> {
        let max_bytes = self.config.server.max_body_bytes;
        let pdf_bytes = FileManager::resolve_source(file_base64, file_url, max_bytes).await?;
        self.translate_document(&pdf_bytes, file_name).await
    }

    /// Translate a file on disk. Returns `None` when the output already
    /// exists and `force_overwrite` is not set.
    pub async fn run(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = output_file.unwrap_or_else(|| FileManager::default_output_path(input_file));
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping {:?}, translation already exists (use -f to force overwrite)",
                output_path
            );
            return Ok(None);
        }

        let pdf_bytes = FileManager::read_bytes(input_file)?;
        let file_name = input_file.file_name().map(|n| n.to_string_lossy().to_string());
        let translated = self.translate_document(&pdf_bytes, file_name.as_deref()).await?;

        FileManager::write_bytes(&output_path, &translated.pdf_bytes)?;
        info!("Wrote {:?}", output_path);
        debug!("{}", translated.token_usage.summary());

        Ok(Some(output_path))
    }
}
