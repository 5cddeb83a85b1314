//! HTTP provider for OpenAI-compatible chat completions APIs.
//!
//! Works against any endpoint speaking the `/chat/completions` protocol
//! (Mistral, OpenAI, vLLM, Ollama). Transient failures (429, 5xx,
//! connect/timeout) are retried with exponential backoff.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ProviderSettings;
use crate::error::{Error, Result};

use super::{Generation, GenerationRequest, ProviderHealth, TextProvider};

// ─────────────────────────────────────────────────────────────────
// API types (request/response)
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

// ─────────────────────────────────────────────────────────────────
// HTTP Provider
// ─────────────────────────────────────────────────────────────────

/// Live text provider backed by an OpenAI-compatible HTTP API.
pub struct HttpProvider {
    settings: ProviderSettings,
    client: Client,
}

impl HttpProvider {
    /// Create a new HTTP provider from settings.
    pub fn new(settings: ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        info!(
            base_url = %settings.base_url,
            model = %settings.model,
            "HTTP provider created"
        );

        Self { settings, client }
    }

    /// Build the authorization header value (if API key is set)
    fn auth_header(&self) -> Option<String> {
        if self.settings.api_key.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", self.settings.api_key))
        }
    }

    /// Make a chat completion request with retry logic
    async fn chat_completion(&self, request: &GenerationRequest) -> Result<(String, u32, u32)> {
        let mut messages = Vec::new();
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: request.system_prompt.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        let request_body = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        };

        let url = format!("{}/chat/completions", self.settings.base_url);
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.settings.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                debug!(attempt, ?backoff, "Retrying after error");
                tokio::time::sleep(backoff).await;
            }

            let mut req = self.client.post(&url).json(&request_body);
            if let Some(ref auth) = self.auth_header() {
                req = req.header("Authorization", auth);
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        match response.json::<ChatCompletionResponse>().await {
                            Ok(parsed) => {
                                let choice = parsed.choices.first().ok_or_else(|| {
                                    Error::provider_response("no choices in API response")
                                })?;

                                let text = choice.message.content.clone().unwrap_or_default();
                                let (prompt_tokens, completion_tokens) = parsed
                                    .usage
                                    .map(|u| (u.prompt_tokens, u.completion_tokens))
                                    .unwrap_or((0, 0));

                                return Ok((text, prompt_tokens, completion_tokens));
                            }
                            Err(e) => {
                                last_error = Some(Error::provider_response(format!(
                                    "failed to parse API response: {}",
                                    e
                                )));
                            }
                        }
                    } else if status.as_u16() == 429 || status.is_server_error() {
                        // Retryable error
                        let body = response.text().await.unwrap_or_default();
                        warn!(status = %status, attempt, "Retryable API error: {}", body);
                        last_error = Some(if status.as_u16() == 429 {
                            Error::ProviderRateLimited
                        } else {
                            Error::provider_unavailable(
                                &url,
                                format!("API error {}: {}", status, body),
                            )
                        });
                    } else if status.as_u16() == 401 || status.as_u16() == 403 {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::ProviderAuth {
                            message: format!("{}: {}", status, body),
                        });
                    } else {
                        // Non-retryable error
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::provider_unavailable(
                            &url,
                            format!("API error {}: {}", status, body),
                        ));
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        warn!(attempt, error = %e, "Provider request timed out");
                        last_error = Some(Error::ProviderTimeout {
                            timeout_secs: self.settings.timeout_secs,
                        });
                    } else if e.is_connect() {
                        warn!(attempt, error = %e, "Retryable connection error");
                        last_error =
                            Some(Error::provider_unavailable(&url, format!("connect: {}", e)));
                    } else {
                        return Err(Error::Http(e));
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::provider_unavailable(&url, "all retry attempts exhausted")))
    }
}

#[async_trait]
impl TextProvider for HttpProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        let start = Instant::now();
        let (text, prompt_tokens, completion_tokens) = self.chat_completion(request).await?;

        Ok(Generation {
            text,
            prompt_tokens,
            completion_tokens,
            duration_ms: start.elapsed().as_millis() as u64,
            model: self.settings.model.clone(),
            mock: false,
        })
    }

    async fn health(&self) -> ProviderHealth {
        let url = format!("{}/models", self.settings.base_url);
        let mut req = self.client.get(&url);
        if let Some(ref auth) = self.auth_header() {
            req = req.header("Authorization", auth);
        }

        match req.send().await {
            Ok(resp) if resp.status().is_success() => ProviderHealth {
                operational: true,
                mode: "live",
                model: self.settings.model.clone(),
                error: None,
            },
            Ok(resp) => ProviderHealth {
                operational: false,
                mode: "live",
                model: self.settings.model.clone(),
                error: Some(format!("API returned status {}", resp.status())),
            },
            Err(e) => ProviderHealth {
                operational: false,
                mode: "live",
                model: self.settings.model.clone(),
                error: Some(format!("Connection failed: {}", e)),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_name() {
        let provider = HttpProvider::new(ProviderSettings::default());
        assert_eq!(provider.name(), "http");
    }

    #[test]
    fn test_auth_header() {
        let settings = ProviderSettings {
            api_key: "sk-test-123".to_string(),
            ..Default::default()
        };
        let provider = HttpProvider::new(settings);
        assert_eq!(
            provider.auth_header(),
            Some("Bearer sk-test-123".to_string())
        );

        let no_key = HttpProvider::new(ProviderSettings::default());
        assert_eq!(no_key.auth_header(), None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let settings = ProviderSettings {
            base_url: "http://127.0.0.1:1/v1".to_string(),
            api_key: "sk-test".to_string(),
            max_retries: 0,
            timeout_secs: 1,
            ..Default::default()
        };
        let provider = HttpProvider::new(settings);

        let request = GenerationRequest {
            prompt: "oi".to_string(),
            system_prompt: String::new(),
            temperature: 0.7,
            max_tokens: 10,
        };

        let err = provider.generate(&request).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
