use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::error::LlmApiError;
use super::retry::RetryPolicy;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ChatMessage, Config, RetryConfig};
use crate::domain::ports::QueryService;

/// Configuration for the chat completions client
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// Bearer token
    pub api_key: String,

    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Transport retry settings
    pub retry: RetryConfig,
}

impl OpenAiClientConfig {
    /// Build from application config; `None` when no API key is available.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.llm.resolve_api_key()?;
        Some(Self {
            api_key,
            base_url: config.llm.base_url.clone(),
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            timeout_secs: config.llm.timeout_secs,
            retry: config.retry.clone(),
        })
    }
}

/// HTTP client for OpenAI-compatible chat completion APIs
///
/// Provides:
/// - Connection reuse through a single `reqwest::Client`
/// - Bearer authentication via default headers
/// - Exponential backoff retry for 429/5xx and network errors
pub struct OpenAiClient {
    http_client: ReqwestClient,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    retry_policy: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, LlmApiError> {
        // Scrub API key from logs
        let api_key_scrubbed = config
            .api_key
            .get(..6)
            .filter(|_| config.api_key.len() > 12)
            .map_or_else(|| "[REDACTED]".to_string(), |prefix| format!("{prefix}...[REDACTED]"));

        info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            api_key = %api_key_scrubbed,
            "initializing chat completions client"
        );

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| LlmApiError::InvalidRequest(format!("Invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(2)
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            temperature: config.temperature,
            retry_policy: RetryPolicy::from(&config.retry),
        })
    }

    /// Send a conversation and return the first choice's text
    #[instrument(skip(self, messages), fields(model = %self.model, messages = messages.len()))]
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmApiError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: self.temperature,
        };

        let response = self
            .retry_policy
            .execute(|| self.execute_request(&request))
            .await?;

        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion succeeded"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(LlmApiError::EmptyResponse)
    }

    /// Execute a single request (called by retry logic)
    async fn execute_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmApiError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response(response: Response) -> Result<ChatCompletionResponse, LlmApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(%status, body = %body, "chat completions API error");
            return Err(LlmApiError::from_status(status, body));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QueryService for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> DomainResult<String> {
        self.chat(messages).await.map_err(DomainError::from)
    }
}
