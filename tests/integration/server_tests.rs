/*!
 * Tests for the HTTP interface
 */

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use bipdf::file_utils::FileManager;
use bipdf::pdf_extractor::PdfTextExtractor;
use bipdf::providers::mock::MockProvider;
use bipdf::server::{self, AppState, TranslatePdfResponse};
use bipdf::translation::DEFAULT_SEPARATOR;

use crate::common;
use crate::common::fake_service::start_file_host;

const BODY_LIMIT: usize = 8 * 1024 * 1024;

fn test_router(provider: Arc<MockProvider>) -> Router {
    server::router(AppState::new(common::mock_controller(provider)), BODY_LIMIT)
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/translate-pdf")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_shouldReportServiceAndVersion() {
    let router = test_router(Arc::new(MockProvider::translating(DEFAULT_SEPARATOR)));

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "bipdf");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_preflight_fromBrowserOrigin_shouldAllowClientHeaders() {
    let router = test_router(Arc::new(MockProvider::translating(DEFAULT_SEPARATOR)));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/translate-pdf")
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-client-info,apikey,content-type")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("x-client-info"));
    assert!(allowed.contains("apikey"));
    assert!(allowed.contains("authorization"));
}

#[tokio::test]
async fn test_translatePdf_withInlineBase64_shouldReturnBilingualPdf() {
    let provider = Arc::new(MockProvider::translating(DEFAULT_SEPARATOR));
    let router = test_router(provider.clone());
    let pdf = common::create_test_pdf(&["Hello world. This is a test."]);
    let body = json!({
        "fileBase64": FileManager::encode_base64(&pdf),
        "fileName": "report.pdf",
    });

    let response = router.oneshot(post_json(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: TranslatePdfResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed.file_name, "translated_report.pdf");

    let output = FileManager::decode_base64(&parsed.translated_base64).unwrap();
    let text = PdfTextExtractor::extract(&output).unwrap().text;
    assert_eq!(
        text,
        "Hello world. [ar] Hello world. This is a test. [ar] This is a test."
    );
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translatePdf_withFileUrl_shouldDownloadAndTranslate() {
    let pdf = common::create_test_pdf(&["Remote sentence."]);
    let addr = start_file_host(pdf).await;
    let router = test_router(Arc::new(MockProvider::translating(DEFAULT_SEPARATOR)));
    let body = json!({ "fileUrl": format!("http://{}/files/doc.pdf", addr) });

    let response = router.oneshot(post_json(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["fileName"], "translated_document.pdf");
    assert!(body["translatedBase64"].as_str().is_some_and(|b| !b.is_empty()));
}

#[tokio::test]
async fn test_translatePdf_withoutInput_shouldReturnError() {
    let provider = Arc::new(MockProvider::translating(DEFAULT_SEPARATOR));
    let router = test_router(provider.clone());

    let response = router
        .oneshot(post_json(json!({ "fileName": "a.pdf" }).to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Either fileBase64 or fileUrl is required" })
    );
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translatePdf_withUnreachableDocument_shouldReportDownloadFailure() {
    let addr = start_file_host(Vec::new()).await;
    let router = test_router(Arc::new(MockProvider::translating(DEFAULT_SEPARATOR)));
    let body = json!({ "fileUrl": format!("http://{}/files/missing.pdf", addr) });

    let response = router.oneshot(post_json(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to download PDF");
}

#[tokio::test]
async fn test_translatePdf_withFailingProvider_shouldReportStatus() {
    let router = test_router(Arc::new(MockProvider::failing(503)));
    let pdf = common::create_test_pdf(&["Hello world."]);
    let body = json!({ "fileBase64": FileManager::encode_base64(&pdf) });

    let response = router.oneshot(post_json(body.to_string())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Translation failed: 503");
}

#[tokio::test]
async fn test_translatePdf_withMalformedJson_shouldReturnErrorBody() {
    let router = test_router(Arc::new(MockProvider::translating(DEFAULT_SEPARATOR)));

    let response = router.oneshot(post_json("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
}
