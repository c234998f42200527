/*!
 * Tests for the translation service
 */

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use yamtwai::app_config::TranslationConfig;
use yamtwai::errors::ProviderError;
use yamtwai::providers::mock::MockProvider;
use yamtwai::translation::{LanguagePair, TranslationService};

fn service_with(provider: &MockProvider) -> TranslationService {
    TranslationService::with_provider(TranslationConfig::default(), Arc::new(provider.clone()))
}

fn en_de() -> LanguagePair {
    LanguagePair::new("en", "de").unwrap()
}

/// Test that the request carries the prompts, model and budget
#[test]
fn test_build_request_shouldUseConfiguredModelAndBudget() {
    let service = service_with(&MockProvider::working());

    let request = service.build_request("# Title\n", &en_de());

    assert_eq!(request.model(), "qwen2:7b");
    assert_eq!(request.get_max_tokens(), Some(1024));
    assert_eq!(request.get_temperature(), Some(0.5));
    assert_eq!(request.get_messages().len(), 3);
    assert!(request.get_messages()[0].content.contains("german"));
    assert_eq!(request.user_content(), Some("# Title\n"));
}

/// Test translation through the provider
#[tokio::test]
async fn test_translate_text_withUppercaseMock_shouldReturnProviderText() -> Result<()> {
    let provider = MockProvider::uppercase();
    let service = service_with(&provider);

    let text = service.translate_text("hello\n", &en_de()).await?;

    assert_eq!(text, "HELLO\n");
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

/// Test that whitespace-only text is returned unchanged without a request
#[tokio::test]
async fn test_translate_text_withWhitespaceOnly_shouldSkipRequest() -> Result<()> {
    let provider = MockProvider::failing();
    let service = service_with(&provider);

    let text = service.translate_text("\n  \n", &en_de()).await?;

    assert_eq!(text, "\n  \n");
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Test that token usage accumulates across requests
#[tokio::test]
async fn test_translate_text_withUsage_shouldAccumulateStats() -> Result<()> {
    let provider = MockProvider::working();
    let service = service_with(&provider);

    service.translate_text("abcdefgh", &en_de()).await?;
    service.translate_text("abcd", &en_de()).await?;

    let usage = service.token_usage();
    assert_eq!(usage.requests, 2);
    assert_eq!(usage.prompt_tokens, 3);
    assert_eq!(usage.completion_tokens, 3);
    assert_eq!(usage.total_tokens, 6);
    assert!(usage.summary().contains("requests: 2"));
    Ok(())
}

/// Test that provider errors surface unchanged
#[tokio::test]
async fn test_translate_text_withEmptyResponse_shouldReturnError() {
    let service = service_with(&MockProvider::empty());

    let result = service.translate_text("hello", &en_de()).await;

    assert!(matches!(result, Err(ProviderError::EmptyResponse)));
    assert_eq!(service.token_usage().requests, 0);
}

/// Test that a caller-side deadline cuts a slow provider short
#[tokio::test]
async fn test_translate_text_withSlowProvider_shouldHitDeadline() {
    let provider = MockProvider::slow(500);
    let service = service_with(&provider);

    let result = tokio::time::timeout(Duration::from_millis(50), service.translate_text("hello", &en_de())).await;

    assert!(result.is_err());
    assert_eq!(provider.request_count(), 1);
    assert_eq!(service.token_usage().requests, 0);
}
