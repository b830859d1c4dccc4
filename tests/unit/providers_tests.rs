/*!
 * Tests for provider implementations against a local fake service
 */

use axum::http::StatusCode;

use bipdf::errors::ProviderError;
use bipdf::providers::openai::OpenAI;
use bipdf::providers::{CompletionRequest, Provider};
use bipdf::translation::DEFAULT_SEPARATOR;

use crate::common::fake_service::{FakeReply, FakeTranslationService, TEST_API_KEY};

fn request(user: &str) -> CompletionRequest {
    CompletionRequest {
        model: "google/gemini-2.5-flash".to_string(),
        system: "You are a professional translator.".to_string(),
        user: user.to_string(),
        temperature: Some(0.2),
        max_tokens: 512,
    }
}

#[tokio::test]
async fn test_openai_complete_withWorkingService_shouldReturnTextAndUsage() {
    let service = FakeTranslationService::start(FakeReply::Translate).await;
    let client = OpenAI::new(TEST_API_KEY, service.endpoint(), 10);

    let user = format!("Hello.\n{}\nBye.", DEFAULT_SEPARATOR);
    let response = client.complete(request(&user)).await.unwrap();

    assert_eq!(
        response.text,
        format!("ترجمة: Hello.\n{}\nترجمة: Bye.", DEFAULT_SEPARATOR)
    );
    assert_eq!(response.prompt_tokens, Some(12));
    assert_eq!(response.completion_tokens, Some(8));
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn test_openai_complete_withRateLimit_shouldReturnApiError() {
    let service = FakeTranslationService::start(FakeReply::Status(StatusCode::TOO_MANY_REQUESTS)).await;
    let client = OpenAI::new(TEST_API_KEY, service.endpoint(), 10);

    match client.complete(request("Hello.")).await {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 429);
            assert!(message.contains("fake failure"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_complete_withWrongKey_shouldSurfaceUnauthorized() {
    let service = FakeTranslationService::start(FakeReply::Translate).await;
    let client = OpenAI::new("wrong-key", service.endpoint(), 10);

    let err = client.complete(request("Hello.")).await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError { status_code: 401, .. }));
}

#[tokio::test]
async fn test_openai_complete_withUnreachableHost_shouldReturnTransportError() {
    // Port 9 (discard) is not expected to be listening locally
    let client = OpenAI::new(TEST_API_KEY, "http://127.0.0.1:9/v1", 2);

    let err = client.complete(request("Hello.")).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::ConnectionError(_) | ProviderError::RequestFailed(_)
    ));
}
