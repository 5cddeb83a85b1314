//! Request routing: classify a message into a guidance task.
//!
//! In live mode the model classifies the request and returns JSON. Keyword
//! rules are the authoritative fallback and the only path in mock mode,
//! since canned responses never parse as routing JSON anyway.

use serde_json::Value;
use tracing::{debug, warn};

use crate::provider::{GenerationRequest, ProviderService};
use crate::types::{Language, Persona, TaskKind};

use super::persona_context;

/// Routing decision for one request.
#[derive(Debug, Clone)]
pub struct Routing {
    pub task: TaskKind,
    pub confidence: f64,
    pub reasoning: String,
}

/// Classifies messages into guidance tasks.
pub struct RouterAgent;

impl RouterAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "router_agent"
    }

    /// Decide which task a message calls for.
    pub async fn route(
        &self,
        provider: &ProviderService,
        persona: &Persona,
        message: &str,
        requested: Option<TaskKind>,
        language: Language,
    ) -> Routing {
        if !provider.is_mock() {
            let request = GenerationRequest {
                prompt: build_routing_prompt(persona, message, requested),
                system_prompt: system_prompt(language).to_string(),
                // Low temperature keeps classification consistent.
                temperature: 0.3,
                max_tokens: 300,
            };

            match provider.generate(&request).await {
                Ok(generation) => {
                    if let Some(routing) = parse_routing(&generation.text) {
                        debug!(task = routing.task.slug(), confidence = routing.confidence, "Routed by model");
                        return routing;
                    }
                    warn!("Routing response had no parseable JSON, using keyword rules");
                }
                Err(e) => {
                    warn!(error = %e.format_for_log(), "Routing generation failed, using keyword rules");
                }
            }
        }

        keyword_route(message)
    }
}

/// Rule-based routing over message keywords.
fn keyword_route(message: &str) -> Routing {
    let message = message.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| message.contains(w));

    let task = if contains_any(&["curso", "treinamento", "aprender", "estudar", "course", "learn"]) {
        TaskKind::LearningGuidance
    } else if contains_any(&["emprego", "trabalho", "vaga", "carreira", "job", "career"]) {
        TaskKind::CareerExploration
    } else if contains_any(&["habilidade", "skill", "competência", "experiência"]) {
        TaskKind::SkillAssessment
    } else if contains_any(&["plano", "caminho", "próximos passos", "como começar", "pathway"]) {
        TaskKind::PathwayPlanning
    } else {
        TaskKind::Awareness
    };

    Routing {
        task,
        confidence: 0.7,
        reasoning: "Roteamento baseado em regras de palavras-chave".to_string(),
    }
}

/// Extract the `{...}` JSON block from a model response and read the
/// routing fields out of it.
fn parse_routing(text: &str) -> Option<Routing> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    let value: Value = serde_json::from_str(&text[start..=end]).ok()?;

    let task = value
        .get("recommended_task")?
        .as_str()?
        .to_lowercase()
        .parse::<TaskKind>()
        .ok()?;
    let confidence = value
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);
    let reasoning = value
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or("Análise automática baseada no perfil")
        .to_string();

    Some(Routing {
        task,
        confidence,
        reasoning,
    })
}

fn build_routing_prompt(persona: &Persona, message: &str, requested: Option<TaskKind>) -> String {
    let requested = requested.map(|t| t.slug()).unwrap_or("não especificado");
    format!(
        "Analise esta solicitação de um jovem brasileiro interessado em carreiras verdes:\n\n\
         {}\n\
         Mensagem do usuário: \"{}\"\n\
         Tipo de tarefa solicitada: {}\n\n\
         Com base no perfil do jovem e na mensagem, determine:\n\n\
         1. Qual tipo de tarefa é mais apropriado:\n\
            - awareness: Conscientização geral sobre carreiras verdes\n\
            - career_exploration: Exploração específica de oportunidades de trabalho\n\
            - skill_assessment: Avaliação de habilidades e lacunas\n\
            - learning_guidance: Orientação sobre treinamentos e cursos\n\
            - pathway_planning: Planejamento de carreira passo a passo\n\
         2. Confiança na recomendação (0-1)\n\
         3. Justificativa para a escolha\n\n\
         Responda em formato JSON:\n\
         {{\"recommended_task\": \"tipo_de_tarefa\", \"confidence\": 0.0, \"reasoning\": \"explicação\"}}",
        persona_context(persona),
        message,
        requested,
    )
}

fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::PtBr => {
            "Você é um agente especialista em orientação de carreira verde para jovens brasileiros. \
             Sua função é analisar solicitações e determinar o melhor tipo de assistência.\n\n\
             Diretrizes:\n\
             - Considere o nível de prontidão do jovem (exploring, interested, preparing, ready, experienced)\n\
             - Avalie limitações de tempo, orçamento e localização\n\
             - Priorize oportunidades locais e acessíveis\n\
             - Seja empático e encorajador\n\
             - Foque em empregos verdes relevantes para o Brasil\n\
             - Responda sempre em português brasileiro amigável\n\n\
             Mantenha o foco em carreiras sustentáveis: energia solar/eólica, gestão de resíduos, \
             agricultura sustentável, veículos elétricos, silvicultura, consultoria ESG."
        }
        Language::En => {
            "You are a routing agent specialized in green career guidance for Brazilian youth. \
             Your role is to analyze requests and determine the best type of assistance needed.\n\n\
             Guidelines:\n\
             - Consider the youth's readiness level (exploring, interested, preparing, ready, experienced)\n\
             - Evaluate time, budget, and location constraints\n\
             - Prioritize local and accessible opportunities\n\
             - Be empathetic and encouraging\n\
             - Focus on green jobs relevant to Brazil\n\n\
             Focus on sustainable careers: solar/wind energy, waste management, \
             sustainable agriculture, electric vehicles, forestry, ESG consulting."
        }
    }
}
