use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for OpenAI-compatible chat completion services (OpenAI, Ollama, LM Studio)
pub struct OpenAI {
    /// HTTP client for API requests, reused across all requests
    client: Client,
    /// API key sent as a bearer token
    api_key: String,
    /// Base URL of the service, with or without a trailing `/v1`
    endpoint: String,
    /// Request timeout, kept for error reporting
    timeout_secs: u64,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<OpenAIMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,

    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Role-tagged chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,

    /// Content of the message
    pub content: String,
}

/// Token usage information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Number of completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

/// Single completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChoice {
    /// Generated message
    pub message: OpenAIMessage,
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIResponse {
    /// Generated choices; the first one carries the result
    pub choices: Vec<OpenAIChoice>,
    /// Token usage, when the service reports it
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl OpenAIMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

impl OpenAIRequest {
    /// Create a new request for the given model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage::new(role, content));
        self
    }

    /// Replace all messages
    pub fn messages(mut self, messages: Vec<OpenAIMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get_messages(&self) -> &[OpenAIMessage] {
        &self.messages
    }

    pub fn get_temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn get_max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Content of the last user message, i.e. the text to transform
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

impl OpenAIResponse {
    /// Build a single-choice assistant response
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![OpenAIChoice {
                message: OpenAIMessage::new("assistant", text),
            }],
            usage: None,
        }
    }

    /// Extract the generated text of the first choice
    pub fn text(&self) -> Result<&str, ProviderError> {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or(ProviderError::EmptyResponse)
    }
}

impl OpenAI {
    /// Create a new client with a fixed per-request timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            timeout_secs,
        })
    }

    /// Full URL of the chat completions route
    pub fn completions_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

impl fmt::Debug for OpenAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAI")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Provider for OpenAI {
    async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let url = self.completions_url();
        debug!("POST {} (model {}, {} messages)", url, request.model, request.messages.len());

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Chat completions API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await
            .map_err(|e| self.map_send_error(e))?;

        serde_json::from_str::<OpenAIResponse>(&response_text).map_err(|e| {
            let preview: String = response_text.chars().take(500).collect();
            error!("Failed to parse chat completions response: {}. Raw response (first 500 chars): {}", e, preview);
            ProviderError::ParseError(e.to_string())
        })
    }
}
