/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Echoes the content, or applies a custom transform
 * - `MockProvider::uppercase()` - Returns the content uppercased
 * - `MockProvider::fail_on_call(n)` - Fails only the n-th request (1-based)
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Returns a response without choices
 *
 * Every request is recorded so tests can inspect the prompts that were sent.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::openai::{OpenAIRequest, OpenAIResponse, TokenUsage};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails the n-th request (1-based), succeeds otherwise
    FailOnCall { call: usize },
    /// Fails every request whose content contains the marker
    FailOnContent { marker: &'static str },
    /// Always fails with an error
    Failing,
    /// Returns a response with no choices
    Empty,
    /// Sleeps before answering (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter
    request_count: Arc<AtomicUsize>,
    /// Requests received, in order
    requests: Arc<Mutex<Vec<OpenAIRequest>>>,
    /// Custom response generator applied to the user content (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that echoes its input
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a working mock provider that uppercases its input
    pub fn uppercase() -> Self {
        Self::working().with_custom_response(|text| text.to_uppercase())
    }

    /// Create a mock that fails only the given request (1-based)
    pub fn fail_on_call(call: usize) -> Self {
        Self::new(MockBehavior::FailOnCall { call })
    }

    /// Create a mock that fails every request whose content contains `marker`
    pub fn fail_on_content(marker: &'static str) -> Self {
        Self::new(MockBehavior::FailOnContent { marker })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns responses without choices
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the requests received so far
    pub fn requests(&self) -> Vec<OpenAIRequest> {
        self.requests.lock().clone()
    }

    fn respond(&self, content: &str) -> OpenAIResponse {
        let text = match self.custom_response {
            Some(generator) => generator(content),
            None => content.to_string(),
        };

        let mut response = OpenAIResponse::from_text(text);
        let prompt_tokens = content.chars().count() as u32 / 4;
        response.usage = Some(TokenUsage {
            prompt_tokens,
            completion_tokens: prompt_tokens,
            total_tokens: prompt_tokens * 2,
        });
        response
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            requests: Arc::clone(&self.requests),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let call = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        let content = request.user_content().unwrap_or_default().to_string();
        self.requests.lock().push(request);

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(&content)),

            MockBehavior::FailOnCall { call: failing_call } => {
                if call == failing_call {
                    Err(ProviderError::ApiError {
                        status_code: 500,
                        message: format!("Simulated failure on request {}", call),
                    })
                } else {
                    Ok(self.respond(&content))
                }
            }

            MockBehavior::FailOnContent { marker } => {
                if content.contains(marker) {
                    Err(ProviderError::ConnectionError(format!("Simulated failure for content containing '{}'", marker)))
                } else {
                    Ok(self.respond(&content))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string())),

            MockBehavior::Empty => Ok(OpenAIResponse {
                choices: Vec::new(),
                usage: None,
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(self.respond(&content))
            }
        }
    }
}
