//! Text generation providers.
//!
//! The service talks to one hosted OpenAI-compatible chat completions API
//! through the [`TextProvider`] trait. A deterministic [`MockProvider`]
//! serves canned Portuguese responses when no API key is configured, and
//! doubles as the fallback when the live provider fails.

mod cache;
mod http;
mod mock;

pub use cache::ResponseCache;
pub use http::HttpProvider;
pub use mock::MockProvider;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ProviderSettings;
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────
// Request / Output
// ─────────────────────────────────────────────────────────────────

/// A text generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// User prompt.
    pub prompt: String,

    /// System instruction prepended to the conversation.
    pub system_prompt: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Maximum completion tokens.
    pub max_tokens: u32,
}

/// A generated completion with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// Generated text.
    pub text: String,

    /// Prompt token count (provider-reported or estimated).
    pub prompt_tokens: u32,

    /// Completion token count.
    pub completion_tokens: u32,

    /// Generation wall time in milliseconds.
    pub duration_ms: u64,

    /// Model that produced the text.
    pub model: String,

    /// Whether this came from the mock provider.
    pub mock: bool,
}

/// Health snapshot of a provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderHealth {
    /// Whether the provider can serve requests.
    pub operational: bool,

    /// "mock" or "live".
    pub mode: &'static str,

    /// Model identifier.
    pub model: String,

    /// Error message if unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// TextProvider Trait
// ─────────────────────────────────────────────────────────────────

/// A text generation backend.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name ("http", "mock").
    fn name(&self) -> &'static str;

    /// Generate a completion.
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation>;

    /// Check provider health.
    async fn health(&self) -> ProviderHealth;
}

/// Type alias for a shared provider reference.
pub type SharedProvider = Arc<dyn TextProvider>;

// ─────────────────────────────────────────────────────────────────
// Provider Service
// ─────────────────────────────────────────────────────────────────

/// Front door for text generation: cache, primary provider, mock fallback.
///
/// Every request first consults the TTL cache. A live-provider failure is
/// never surfaced to the caller; the mock provider answers instead so the
/// assistant keeps working offline.
pub struct ProviderService {
    primary: SharedProvider,
    fallback: Arc<MockProvider>,
    cache: ResponseCache,
    mock_mode: bool,
    default_temperature: f64,
    default_max_tokens: u32,
}

impl ProviderService {
    /// Build the service from provider settings.
    ///
    /// With `mock_mode` set (or no API key) the mock provider is primary
    /// and no HTTP client is constructed.
    pub fn new(settings: &ProviderSettings) -> Self {
        let mock_mode = settings.mock_mode || settings.api_key.is_empty();
        let fallback = Arc::new(MockProvider::new());

        let primary: SharedProvider = if mock_mode {
            fallback.clone()
        } else {
            Arc::new(HttpProvider::new(settings.clone()))
        };

        Self {
            primary,
            fallback,
            cache: ResponseCache::new(settings.cache_max_entries, settings.cache_ttl_secs),
            mock_mode,
            default_temperature: settings.temperature,
            default_max_tokens: settings.max_tokens,
        }
    }

    /// Whether the service answers from canned responses.
    pub fn is_mock(&self) -> bool {
        self.mock_mode
    }

    /// Configured sampling temperature, used when an agent does not set
    /// its own.
    pub fn default_temperature(&self) -> f64 {
        self.default_temperature
    }

    /// Configured completion token budget, used when an agent does not
    /// set its own.
    pub fn default_max_tokens(&self) -> u32 {
        self.default_max_tokens
    }

    /// Number of cached responses.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Generate a completion, consulting the cache first.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        let key = ResponseCache::key_for(request);

        if let Some(cached) = self.cache.get(&key) {
            debug!(provider = self.primary.name(), "Returning cached response");
            return Ok(cached);
        }

        let start = Instant::now();
        let generation = match self.primary.generate(request).await {
            Ok(g) => g,
            Err(e) => {
                warn!(
                    provider = self.primary.name(),
                    error = %e.format_for_log(),
                    "Provider failed, falling back to mock response"
                );
                self.fallback.generate(request).await?
            }
        };

        debug!(
            provider = self.primary.name(),
            chars = generation.text.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated response"
        );

        self.cache.insert(key, generation.clone());
        Ok(generation)
    }

    /// Health of the active provider.
    pub async fn health(&self) -> ProviderHealth {
        self.primary.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderSettings;

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "Quero trabalhar com energia solar".to_string(),
            system_prompt: "Você é um orientador de carreiras verdes.".to_string(),
            temperature: 0.5,
            max_tokens: 200,
        }
    }

    #[tokio::test]
    async fn test_mock_mode_without_key() {
        let settings = ProviderSettings {
            mock_mode: false,
            api_key: String::new(),
            ..Default::default()
        };
        let service = ProviderService::new(&settings);
        assert!(service.is_mock());
    }

    #[tokio::test]
    async fn test_generate_caches_response() {
        let service = ProviderService::new(&ProviderSettings::default());
        assert_eq!(service.cache_len(), 0);

        let first = service.generate(&request()).await.unwrap();
        assert_eq!(service.cache_len(), 1);

        let second = service.generate(&request()).await.unwrap();
        assert_eq!(first.text, second.text);
        assert_eq!(service.cache_len(), 1);
    }

    #[tokio::test]
    async fn test_mock_generation_is_portuguese() {
        let service = ProviderService::new(&ProviderSettings::default());
        let generation = service.generate(&request()).await.unwrap();
        assert!(generation.mock);
        assert!(!generation.text.is_empty());
    }

    #[tokio::test]
    async fn test_health_reports_mock_mode() {
        let service = ProviderService::new(&ProviderSettings::default());
        let health = service.health().await;
        assert!(health.operational);
        assert_eq!(health.mode, "mock");
    }
}
