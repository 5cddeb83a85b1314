//! Mock text provider with canned Portuguese responses.
//!
//! Picks a response bucket from keywords in the prompt, so the whole API
//! stays usable for demos and tests without a hosted model. Also used as
//! the fallback when the live provider fails.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;

use crate::error::Result;

use super::{Generation, GenerationRequest, ProviderHealth, TextProvider};

const MODEL_NAME: &str = "mock-mistral";

const CAREER_RESPONSE: &str = "Com base no seu perfil, recomendo explorar oportunidades em \
energia solar, que está crescendo rapidamente no Brasil. Considere começar com um curso \
técnico em instalação de painéis solares e depois buscar certificações específicas. O setor \
oferece boas perspectivas de emprego, especialmente no Nordeste brasileiro.";

const LEARNING_RESPONSE: &str = "Existem várias opções de treinamento disponíveis para você. \
Recomendo começar com cursos online gratuitos sobre sustentabilidade e depois partir para \
certificações mais específicas. O SENAI oferece cursos técnicos em energia renovável que são \
muito valorizados pelo mercado.";

const PATHWAY_RESPONSE: &str = "Aqui está um plano de carreira personalizado para você: \
1) Complete um curso básico de sustentabilidade (1-2 meses), 2) Faça um estágio ou trabalho \
voluntário na área (3-6 meses), 3) Busque uma certificação técnica específica (6-12 meses), \
4) Aplique para vagas júnior em empresas do setor. Essa progressão está alinhada com seu \
perfil e orçamento.";

const AWARENESS_RESPONSE: &str = "O Brasil oferece muitas oportunidades em empregos verdes! \
Setores como energia renovável, gestão de resíduos e agricultura sustentável estão em \
expansão. Mesmo sem experiência prévia, existem programas de capacitação que podem te \
preparar para essas carreiras promissoras.";

const HIGH_TEMPERATURE_SUFFIX: &str = " Lembre-se de que cada jornada é única, e você pode \
adaptar essas sugestões às suas necessidades específicas.";

/// Deterministic mock provider.
pub struct MockProvider {
    calls: AtomicU64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
        }
    }

    /// Number of generate() calls served.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Pick a canned response from prompt keywords.
    fn canned_response(prompt: &str) -> &'static str {
        let prompt_lower = prompt.to_lowercase();

        let contains_any = |words: &[&str]| words.iter().any(|w| prompt_lower.contains(w));

        if contains_any(&["carreira", "emprego", "trabalho", "career", "job"]) {
            CAREER_RESPONSE
        } else if contains_any(&["curso", "treinamento", "aprender", "learning", "training"]) {
            LEARNING_RESPONSE
        } else if contains_any(&["caminho", "plano", "próximos passos", "pathway", "plan"]) {
            PATHWAY_RESPONSE
        } else {
            AWARENESS_RESPONSE
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        let start = Instant::now();
        self.calls.fetch_add(1, Ordering::Relaxed);

        let mut text = Self::canned_response(&request.prompt).to_string();
        if request.temperature > 0.7 {
            text.push_str(HIGH_TEMPERATURE_SUFFIX);
        }

        // Word counts stand in for real token usage
        let prompt_tokens = request.prompt.split_whitespace().count() as u32;
        let completion_tokens = text.split_whitespace().count() as u32;

        Ok(Generation {
            text,
            prompt_tokens,
            completion_tokens,
            duration_ms: start.elapsed().as_millis() as u64,
            model: MODEL_NAME.to_string(),
            mock: true,
        })
    }

    async fn health(&self) -> ProviderHealth {
        ProviderHealth {
            operational: true,
            mode: "mock",
            model: MODEL_NAME.to_string(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str, temperature: f64) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            system_prompt: String::new(),
            temperature,
            max_tokens: 200,
        }
    }

    #[tokio::test]
    async fn test_career_keywords() {
        let provider = MockProvider::new();
        let gen = provider
            .generate(&request("Quero um emprego verde", 0.5))
            .await
            .unwrap();
        assert!(gen.text.contains("energia solar"));
        assert!(gen.mock);
    }

    #[tokio::test]
    async fn test_learning_keywords() {
        let provider = MockProvider::new();
        let gen = provider
            .generate(&request("Qual curso devo fazer?", 0.5))
            .await
            .unwrap();
        assert!(gen.text.contains("SENAI"));
    }

    #[tokio::test]
    async fn test_pathway_keywords() {
        let provider = MockProvider::new();
        let gen = provider
            .generate(&request("Me ajuda a montar um plano", 0.5))
            .await
            .unwrap();
        assert!(gen.text.contains("plano de carreira"));
    }

    #[tokio::test]
    async fn test_awareness_fallback() {
        let provider = MockProvider::new();
        let gen = provider
            .generate(&request("Me fala sobre a economia verde", 0.5))
            .await
            .unwrap();
        assert!(gen.text.contains("empregos verdes"));
    }

    #[tokio::test]
    async fn test_high_temperature_suffix() {
        let provider = MockProvider::new();
        let cool = provider.generate(&request("oi", 0.5)).await.unwrap();
        let hot = provider.generate(&request("oi", 0.9)).await.unwrap();
        assert!(hot.text.len() > cool.text.len());
        assert!(hot.text.contains("jornada é única"));
    }

    #[tokio::test]
    async fn test_call_count() {
        let provider = MockProvider::new();
        assert_eq!(provider.call_count(), 0);
        provider.generate(&request("oi", 0.5)).await.unwrap();
        provider.generate(&request("oi", 0.5)).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }
}
