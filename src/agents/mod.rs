//! Multi-agent guidance orchestration.
//!
//! One request flows safety screen -> router -> specialist agent. The
//! router picks a task kind, the matching specialist builds the prompt and
//! calls the provider, and the orchestrator assembles the reply with
//! contextual next steps.

mod career;
mod guidance;
mod learning;
mod router;
mod safety;

pub use career::CareerAgent;
pub use guidance::GuidanceAgent;
pub use learning::LearningAgent;
pub use router::{RouterAgent, Routing};
pub use safety::{SafetyAgent, SafetyVerdict};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::provider::{Generation, GenerationRequest, ProviderService};
use crate::types::{GuidanceReply, GuidanceRequest, Language, Persona, TaskKind};

// ─────────────────────────────────────────────────────────────────
// Specialist Agents
// ─────────────────────────────────────────────────────────────────

/// A domain specialist that answers one kind of guidance task.
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    fn name(&self) -> &'static str;
    fn build_prompt(&self, persona: &Persona, message: &str) -> String;
    fn system_prompt(&self, language: Language) -> &'static str;

    /// Sampling temperature override; `None` uses the configured
    /// provider default.
    fn temperature(&self) -> Option<f64> {
        None
    }

    /// Completion token override; `None` uses the configured provider
    /// default.
    fn max_tokens(&self) -> Option<u32> {
        None
    }

    /// Generate this agent's answer through the provider.
    async fn respond(
        &self,
        provider: &ProviderService,
        persona: &Persona,
        message: &str,
        language: Language,
    ) -> Result<Generation> {
        let request = GenerationRequest {
            prompt: self.build_prompt(persona, message),
            system_prompt: self.system_prompt(language).to_string(),
            temperature: self
                .temperature()
                .unwrap_or_else(|| provider.default_temperature()),
            max_tokens: self
                .max_tokens()
                .unwrap_or_else(|| provider.default_max_tokens()),
        };
        provider.generate(&request).await
    }
}

/// Persona profile block injected into agent prompts.
pub(crate) fn persona_context(persona: &Persona) -> String {
    let p = &persona.profile;
    let interests: Vec<&str> = p.green_interests.iter().map(|i| i.display_name_pt()).collect();
    format!(
        "Persona: {}\n\
         Idade: {} anos\n\
         Localização: {}, {}\n\
         Educação: {}\n\
         Idioma Preferido: {}\n\
         Nível de Prontidão: {}\n\
         Interesses Verdes: {}\n\
         Disponibilidade: {} horas/semana\n\
         Orçamento: R$ {}/mês\n\
         Objetivos: {}\n\
         Acesso à Tecnologia: {}, {}\n\
         Conforto Tecnológico: {}/5\n",
        p.name,
        p.age,
        p.location_city,
        p.location_state.uf(),
        p.education_level.slug(),
        p.preferred_language.tag(),
        p.readiness_level.slug(),
        interests.join(", "),
        p.time_availability,
        p.budget_constraint,
        p.career_goals.join(", "),
        if p.has_smartphone { "Smartphone" } else { "Sem smartphone" },
        if p.has_internet { "Internet" } else { "Sem internet" },
        p.tech_comfort_level,
    )
}

// ─────────────────────────────────────────────────────────────────
// Orchestrator
// ─────────────────────────────────────────────────────────────────

/// Runs the full agent pipeline for one request.
pub struct Orchestrator {
    provider: Arc<ProviderService>,
    router: RouterAgent,
    safety: SafetyAgent,
    career: CareerAgent,
    learning: LearningAgent,
    guidance: GuidanceAgent,
}

impl Orchestrator {
    pub fn new(provider: Arc<ProviderService>) -> Result<Self> {
        Ok(Self {
            provider,
            router: RouterAgent::new(),
            safety: SafetyAgent::new()?,
            career: CareerAgent,
            learning: LearningAgent,
            guidance: GuidanceAgent,
        })
    }

    pub fn provider(&self) -> &ProviderService {
        &self.provider
    }

    /// Process a guidance request end to end.
    ///
    /// Returns `Error::ContentBlocked` when the safety screen rejects the
    /// message; no model call happens in that case.
    pub async fn handle(
        &self,
        request: &GuidanceRequest,
        persona: &Persona,
    ) -> Result<GuidanceReply> {
        let language = request
            .language
            .unwrap_or(persona.profile.preferred_language);

        self.safety.enforce(&request.message, language)?;

        let routing = self
            .router
            .route(
                &self.provider,
                persona,
                &request.message,
                request.task_type,
                language,
            )
            .await;

        let agent: &dyn SpecialistAgent = match routing.task {
            TaskKind::LearningGuidance => &self.learning,
            TaskKind::PathwayPlanning => &self.guidance,
            TaskKind::Awareness | TaskKind::CareerExploration | TaskKind::SkillAssessment => {
                &self.career
            }
        };

        let generation = agent
            .respond(&self.provider, persona, &request.message, language)
            .await?;

        info!(
            persona_id = %persona.id,
            task = routing.task.slug(),
            agent = agent.name(),
            duration_ms = generation.duration_ms,
            mock = generation.mock,
            "Guidance request processed"
        );

        Ok(GuidanceReply {
            response: generation.text,
            recommendations: Vec::new(),
            next_steps: next_steps(persona, routing.task),
            persona_id: persona.id,
            agent_used: agent.name().to_string(),
            task_type: routing.task,
            language,
            confidence_score: routing.confidence,
            reasoning: routing.reasoning,
        })
    }
}

/// Contextual next steps shown with every reply.
fn next_steps(persona: &Persona, task: TaskKind) -> Vec<String> {
    let mut steps: Vec<String> = match task {
        TaskKind::Awareness => vec![
            "Explore setores verdes em crescimento no Brasil",
            "Identifique suas áreas de interesse específicas",
            "Pesquise oportunidades em sua região",
        ],
        TaskKind::CareerExploration => vec![
            "Analise vagas específicas em empresas verdes locais",
            "Conecte-se com profissionais da área no LinkedIn",
            "Participe de eventos e webinars do setor",
        ],
        TaskKind::SkillAssessment => vec![
            "Faça uma autoavaliação de habilidades técnicas",
            "Identifique lacunas de conhecimento prioritárias",
            "Busque feedback de profissionais experientes",
        ],
        TaskKind::LearningGuidance => vec![
            "Pesquise cursos gratuitos online sobre sustentabilidade",
            "Considere certificações reconhecidas pelo mercado",
            "Explore programas de capacitação do SENAI",
        ],
        TaskKind::PathwayPlanning => vec![
            "Defina metas de curto e longo prazo",
            "Crie um cronograma de desenvolvimento",
            "Identifique marcos de progresso mensuráveis",
        ],
    }
    .into_iter()
    .map(String::from)
    .collect();

    if persona.profile.budget_constraint == 0 {
        steps.push("Procure oportunidades gratuitas de desenvolvimento".to_string());
    }
    if persona.profile.tech_comfort_level < 3 {
        steps.push("Desenvolva habilidades digitais básicas".to_string());
    }

    steps
}
