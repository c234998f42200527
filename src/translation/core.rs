/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which sends one
 * chunk at a time to the configured provider and returns the translated text.
 * Requests are stateless: nothing from a previous chunk is carried into the next.
 */

use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::openai::{OpenAI, OpenAIRequest};
use super::document::LanguagePair;
use super::prompts::TranslationPromptBuilder;

/// Token usage statistics for tracking API consumption
#[derive(Clone, Debug)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Number of requests sent
    pub requests: u64,

    /// Start time of token tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl Default for TokenUsageStats {
    fn default() -> Self {
        Self::with_provider_info(String::new(), String::new())
    }
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            requests: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Record one completed request
    pub fn record_request(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>, duration: Duration) {
        self.requests += 1;
        self.api_duration += duration;

        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }
    }

    /// Calculate tokens per minute rate
    pub fn tokens_per_minute(&self) -> f64 {
        // Use the API duration for rate calculation, with fallback to elapsed time
        let duration_minutes = if self.api_duration.as_secs_f64() > 0.0 {
            self.api_duration.as_secs_f64() / 60.0
        } else {
            self.start_time.elapsed().as_secs_f64() / 60.0
        };

        if duration_minutes > 0.0 {
            self.total_tokens as f64 / duration_minutes
        } else {
            0.0
        }
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token usage: {} - {} | requests: {} | prompt: {} | completion: {} | total: {} | API time: {:.2}s | {:.0} tokens/min",
            self.provider,
            self.model,
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.api_duration.as_secs_f64(),
            self.tokens_per_minute()
        )
    }
}

/// Result of translating one text
#[derive(Debug, Clone)]
pub struct TranslationOutput {
    /// Translated text
    pub text: String,
    /// Round trip duration (zero when no request was needed)
    pub duration: Duration,
}

/// Main translation service: one request per chunk, no retries
pub struct TranslationService {
    /// Provider implementation
    provider: Arc<dyn Provider>,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Accumulated usage across all requests made through this service
    usage: Mutex<TokenUsageStats>,
}

impl TranslationService {
    /// Create a new translation service talking to the configured HTTP endpoint
    pub fn new(config: TranslationConfig) -> Result<Self, ProviderError> {
        let client = OpenAI::new(config.get_api_key(), config.get_endpoint(), config.get_timeout_secs())?;
        Ok(Self::with_provider(config, Arc::new(client)))
    }

    /// Create a translation service over any provider (used for test doubles)
    pub fn with_provider(config: TranslationConfig, provider: Arc<dyn Provider>) -> Self {
        let usage = TokenUsageStats::with_provider_info(
            config.provider.display_name().to_string(),
            config.get_model(),
        );

        Self {
            provider,
            config,
            usage: Mutex::new(usage),
        }
    }

    /// Size budget per request, in estimated tokens
    pub fn max_tokens(&self) -> usize {
        self.config.get_max_tokens()
    }

    /// Snapshot of accumulated token usage
    pub fn token_usage(&self) -> TokenUsageStats {
        self.usage.lock().clone()
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection(&self.config.get_model()).await
    }

    /// Build the request for one chunk
    pub fn build_request(&self, text: &str, languages: &LanguagePair) -> OpenAIRequest {
        let messages = TranslationPromptBuilder::new(languages).build_messages(text);
        let max_tokens = u32::try_from(self.max_tokens()).unwrap_or(u32::MAX);

        OpenAIRequest::new(self.config.get_model())
            .messages(messages)
            .temperature(self.config.common.temperature)
            .max_tokens(max_tokens)
    }

    /// Translate a single text string
    pub async fn translate_text(&self, text: &str, languages: &LanguagePair) -> Result<String, ProviderError> {
        Ok(self.translate_text_with_usage(text, languages).await?.text)
    }

    /// Translate text, recording token usage and request duration
    ///
    /// Whitespace-only text is returned as is without a request, so a document
    /// may send fewer requests than it has chunks.
    pub async fn translate_text_with_usage(&self, text: &str, languages: &LanguagePair) -> Result<TranslationOutput, ProviderError> {
        // Whitespace-only chunks (blank lines between sections) need no request
        if text.trim().is_empty() {
            return Ok(TranslationOutput {
                text: text.to_string(),
                duration: Duration::ZERO,
            });
        }

        let request = self.build_request(text, languages);
        let start_time = Instant::now();
        let response = self.provider.complete(request).await?;
        let duration = start_time.elapsed();

        let translated = response.text()?.to_string();
        debug!("Chunk translated in {:?} ({} -> {} chars)", duration, text.chars().count(), translated.chars().count());

        let (prompt_tokens, completion_tokens) = match response.usage.as_ref() {
            Some(usage) => (Some(usage.prompt_tokens as u64), Some(usage.completion_tokens as u64)),
            None => (None, None),
        };
        self.usage.lock().record_request(prompt_tokens, completion_tokens, duration);

        Ok(TranslationOutput {
            text: translated,
            duration,
        })
    }
}
