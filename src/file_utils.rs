use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::{debug, error};
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::errors::SourceError;

// @module: Source document and output file utilities

/// Prefix added to the name of every translated document
pub const OUTPUT_PREFIX: &str = "translated_";

/// Name used when the request carries no file name
pub const DEFAULT_FILE_NAME: &str = "document.pdf";

const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: `translated_<name>`, falling back to `translated_document.pdf`
    pub fn output_file_name(file_name: Option<&str>) -> String {
        let name = file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME);
        format!("{}{}", OUTPUT_PREFIX, name)
    }

    // @generates: Output path next to the input file
    pub fn default_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let file_name = input_file
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        let output_name = Self::output_file_name(file_name.as_deref());

        match input_file.parent() {
            Some(parent) => parent.join(output_name),
            None => PathBuf::from(output_name),
        }
    }

    /// Read a file to bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    // @decodes: Standard base64, with or without a `data:...;base64,` prefix
    pub fn decode_base64(content: &str) -> Result<Vec<u8>, SourceError> {
        let payload = match content.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => content,
        };
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

        BASE64
            .decode(compact)
            .map_err(|e| SourceError::InvalidBase64(e.to_string()))
    }

    pub fn encode_base64(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    /// Download a document, failing on transport errors, non-success statuses
    /// and bodies larger than `max_bytes`
    pub async fn download(url: &str, max_bytes: usize) -> Result<Vec<u8>, SourceError> {
        let url = Url::parse(url).map_err(|e| SourceError::DownloadFailed(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        debug!("Downloading source document from {}", url);
        let mut response = client.get(url.clone()).send().await.map_err(|e| {
            error!("Download of {} failed: {}", url, e);
            SourceError::DownloadFailed(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Download of {} failed with status {}", url, status);
            return Err(SourceError::DownloadFailed(format!("status {}", status)));
        }

        if let Some(length) = response.content_length() {
            if length > max_bytes as u64 {
                error!("Download of {} refused: {} bytes exceeds {}", url, length, max_bytes);
                return Err(SourceError::DownloadFailed(format!("{} bytes exceeds limit", length)));
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| SourceError::DownloadFailed(e.to_string()))?
        {
            if bytes.len() + chunk.len() > max_bytes {
                error!("Download of {} aborted after exceeding {} bytes", url, max_bytes);
                return Err(SourceError::DownloadFailed("body exceeds limit".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    /// Resolve request input to document bytes, inline content first
    pub async fn resolve_source(
        file_base64: Option<&str>,
        file_url: Option<&str>,
        max_download_bytes: usize,
    ) -> Result<Vec<u8>, SourceError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|v| !v.trim().is_empty())
        }

        if let Some(content) = present(file_base64) {
            return Self::decode_base64(content);
        }
        if let Some(url) = present(file_url) {
            return Self::download(url, max_download_bytes).await;
        }
        Err(SourceError::MissingInput)
    }
}
