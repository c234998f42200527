/*!
 * Provider implementations for the translation service.
 *
 * All supported services (Ollama, OpenAI, LM Studio) expose the OpenAI-compatible
 * chat completions protocol, so one wire format is shared:
 * - `openai`: HTTP client for `/v1/chat/completions`
 * - `mock`: In-process test double with configurable behavior
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use self::openai::{OpenAIRequest, OpenAIResponse};

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a chat request
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<OpenAIResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError>;

    /// Test the connection to the provider with a minimal request
    async fn test_connection(&self, model: &str) -> Result<(), ProviderError> {
        let request = OpenAIRequest::new(model)
            .add_message("user", "Hello")
            .max_tokens(8);
        let response = self.complete(request).await?;
        response.text().map(|_| ())
    }
}

pub mod mock;
pub mod openai;
