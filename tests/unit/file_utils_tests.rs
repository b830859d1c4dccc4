/*!
 * Tests for source resolution and output file utilities
 */

use anyhow::Result;
use bipdf::errors::SourceError;
use bipdf::file_utils::FileManager;

use crate::common;
use crate::common::fake_service::start_file_host;

const DOWNLOAD_LIMIT: usize = 1024 * 1024;

#[test]
fn test_writeBytes_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("nested").join("translated_a.pdf");

    FileManager::write_bytes(&path, b"%PDF-1.5")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_bytes(&path)?, b"%PDF-1.5");
    Ok(())
}

#[test]
fn test_readBytes_withMissingFile_shouldMentionPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let err = FileManager::read_bytes(temp_dir.path().join("missing.pdf")).unwrap_err();
    assert!(err.to_string().contains("missing.pdf"));
    Ok(())
}

#[test]
fn test_base64_withPdfBytes_shouldRoundTrip() {
    let pdf = common::create_test_pdf(&["Hello world."]);
    let encoded = FileManager::encode_base64(&pdf);
    assert_eq!(FileManager::decode_base64(&encoded).unwrap(), pdf);
}

#[tokio::test]
async fn test_download_withServedFile_shouldReturnBytes() {
    let pdf = common::create_test_pdf(&["Downloaded."]);
    let addr = start_file_host(pdf.clone()).await;

    let bytes = FileManager::download(&format!("http://{}/files/doc.pdf", addr), DOWNLOAD_LIMIT)
        .await
        .unwrap();
    assert_eq!(bytes, pdf);
}

#[tokio::test]
async fn test_download_withMissingFile_shouldFail() {
    let addr = start_file_host(Vec::new()).await;

    let err = FileManager::download(&format!("http://{}/files/other.pdf", addr), DOWNLOAD_LIMIT)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::DownloadFailed(_)));
    assert_eq!(err.to_string(), "Failed to download PDF");
}

#[tokio::test]
async fn test_resolveSource_withOnlyUrl_shouldDownload() {
    let addr = start_file_host(b"remote".to_vec()).await;
    let url = format!("http://{}/files/doc.pdf", addr);

    let bytes = FileManager::resolve_source(Some(""), Some(&url), DOWNLOAD_LIMIT).await.unwrap();
    assert_eq!(bytes, b"remote");
}

#[tokio::test]
async fn test_download_withOversizedBody_shouldRefuse() {
    let addr = start_file_host(vec![b'x'; 4096]).await;
    let url = format!("http://{}/files/doc.pdf", addr);

    let err = FileManager::download(&url, 1024).await.unwrap_err();
    assert!(matches!(err, SourceError::DownloadFailed(_)));
    assert_eq!(err.to_string(), "Failed to download PDF");

    // Exactly at the limit is accepted
    assert_eq!(FileManager::download(&url, 4096).await.unwrap().len(), 4096);
}
