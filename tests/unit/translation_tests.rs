/*!
 * Tests for segmentation, batching and batch translation
 */

use std::sync::Arc;
use std::time::Duration;

use bipdf::errors::TranslationError;
use bipdf::providers::mock::MockProvider;
use bipdf::translation::segmenter::{batch, segment};
use bipdf::translation::{BatchTranslator, TranslationOptions, TranslationService, DEFAULT_SEPARATOR};

use crate::common;

fn translator(provider: Arc<MockProvider>, options: TranslationOptions) -> BatchTranslator {
    BatchTranslator::new(TranslationService::with_provider(provider, options))
}

#[test]
fn test_segment_withNumberedText_shouldProduceOneSentenceEach() {
    let sentences = segment(&common::numbered_text(25));
    assert_eq!(sentences.len(), 25);
    assert_eq!(sentences[0], "Sentence number 0.");
    assert_eq!(sentences[24], "Sentence number 24.");
}

#[test]
fn test_batch_withTwentyFiveSentences_shouldMakeThreeBatches() {
    let sentences = segment(&common::numbered_text(25));
    let batches = batch(&sentences, 10);

    assert_eq!(batches.len(), 3);
    assert_eq!(batches[2].offset, 20);
    assert_eq!(batches[2].len(), 5);
    let rejoined: Vec<String> = batches.into_iter().flat_map(|b| b.sentences).collect();
    assert_eq!(rejoined, sentences);
}

#[tokio::test]
async fn test_translateSentences_withConcurrentBatches_shouldKeepSourceOrder() {
    let provider = Arc::new(MockProvider::translating(DEFAULT_SEPARATOR).with_delays(vec![
        Duration::from_millis(40),
        Duration::from_millis(20),
        Duration::from_millis(0),
        Duration::from_millis(10),
    ]));
    let options = TranslationOptions {
        batch_size: 3,
        max_concurrent_requests: 4,
        ..TranslationOptions::default()
    };
    let sentences = segment(&common::numbered_text(11));

    let (translations, stats) = translator(provider.clone(), options)
        .translate_sentences(&sentences)
        .await
        .unwrap();

    let expected: Vec<String> = sentences.iter().map(|s| format!("[ar] {}", s)).collect();
    assert_eq!(translations, expected);
    assert_eq!(provider.request_count(), 4);
    assert_eq!(stats.requests, 4);
    assert!(stats.total_tokens > 0);
}

#[tokio::test]
async fn test_translateSentences_withShortReply_shouldRaiseCountMismatch() {
    let short_reply = format!("واحد\n{}\nاثنان", DEFAULT_SEPARATOR);
    let provider = Arc::new(MockProvider::scripted([short_reply]));
    let sentences: Vec<String> = vec!["One.".into(), "Two.".into(), "Three.".into()];

    let err = translator(provider, TranslationOptions::default())
        .translate_sentences(&sentences)
        .await
        .unwrap_err();

    match err {
        TranslationError::CountMismatch { batch_index, expected, actual } => {
            assert_eq!((batch_index, expected, actual), (0, 3, 2));
        }
        other => panic!("expected CountMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_translateBatch_withCustomPrompt_shouldFillPlaceholders() {
    let provider = Arc::new(MockProvider::translating("@@"));
    let options = TranslationOptions {
        target_language: "fr".to_string(),
        separator: "@@".to_string(),
        system_prompt: "{source_language}->{target_language} split by {separator}".to_string(),
        temperature: Some(0.1),
        ..TranslationOptions::default()
    };

    let (translations, _) = translator(provider.clone(), options)
        .translate_sentences(&["Hi.".to_string()])
        .await
        .unwrap();

    assert_eq!(translations, vec!["[ar] Hi."]);
    let requests = provider.requests();
    assert_eq!(requests[0].system, "English->French split by @@");
    assert_eq!(requests[0].temperature, Some(0.1));
}
