//! Pathway planning agent: step-by-step career development plans.

use crate::types::{Language, Persona};

use super::{persona_context, SpecialistAgent};

pub struct GuidanceAgent;

impl SpecialistAgent for GuidanceAgent {
    fn name(&self) -> &'static str {
        "guidance_agent"
    }

    fn max_tokens(&self) -> Option<u32> {
        Some(1000)
    }

    fn build_prompt(&self, persona: &Persona, message: &str) -> String {
        let profile = &persona.profile;
        let tech_access = if profile.has_smartphone && profile.has_internet {
            "Completo"
        } else {
            "Limitado"
        };
        format!(
            "Como conselheiro de carreira especializado em sustentabilidade no Brasil, crie \
             um plano de ação personalizado:\n\n\
             {}\n\
             Solicitação: \"{}\"\n\n\
             Crie um plano de desenvolvimento de carreira estruturado considerando:\n\n\
             1. Avaliação da situação atual: pontos fortes, lacunas, oportunidades imediatas\n\
             2. Objetivos de curto prazo (3-6 meses), médio prazo (6-12 meses) e visão de \
                longo prazo (1-2 anos)\n\
             3. Plano de ação detalhado: 6-8 passos específicos e mensuráveis com cronograma \
                realista, recursos necessários e marcos de progresso\n\
             4. Estratégias específicas para {}: oportunidades locais, rede de contatos \
                regional, recursos e instituições disponíveis\n\
             5. Superação de obstáculos identificados no perfil\n\
             6. Métricas de sucesso e quando reavaliar o plano\n\n\
             Considere:\n\
             - Disponibilidade de tempo: {} horas/semana\n\
             - Orçamento: R$ {}/mês\n\
             - Nível de prontidão: {}\n\
             - Acesso à tecnologia: {}",
            persona_context(persona),
            message,
            profile.location_state.uf(),
            profile.time_availability,
            profile.budget_constraint,
            profile.readiness_level.slug(),
            tech_access,
        )
    }

    fn system_prompt(&self, language: Language) -> &'static str {
        match language {
            Language::PtBr => {
                "Você é um conselheiro de carreira especializado em orientação para carreiras \
                 verdes no Brasil, com foco em jovens de 16-24 anos de diferentes backgrounds \
                 socioeconômicos.\n\n\
                 Abordagem de orientação:\n\
                 - Criar planos específicos, mensuráveis e alcançáveis\n\
                 - Considerar limitações reais (tempo, dinheiro, localização)\n\
                 - Incluir marcos de progresso claros\n\
                 - Adaptar estratégias ao perfil individual\n\
                 - Ser empático mas realista sobre desafios\n\
                 - Focar em ações concretas e próximos passos\n\n\
                 Princípios:\n\
                 - Todo jovem tem potencial para carreira verde\n\
                 - Pequenos passos consistentes levam a grandes resultados\n\
                 - Networking e experiência prática são fundamentais\n\
                 - Oportunidades locais são prioritárias\n\
                 - Empreendedorismo pode ser uma alternativa viável"
            }
            Language::En => {
                "You are a career counselor specialized in green career guidance in Brazil, \
                 focused on youth aged 16-24 from different socioeconomic backgrounds.\n\n\
                 Guidance approach:\n\
                 - Create specific, measurable, and achievable plans\n\
                 - Consider real limitations (time, money, location)\n\
                 - Include clear progress milestones\n\
                 - Adapt strategies to individual profiles\n\
                 - Be empathetic but realistic about challenges\n\
                 - Focus on concrete actions and next steps\n\n\
                 Principles:\n\
                 - Every young person has potential for a green career\n\
                 - Small consistent steps lead to big results\n\
                 - Networking and practical experience are fundamental\n\
                 - Local opportunities are priority\n\
                 - Entrepreneurship can be a viable alternative"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonaDraft;

    #[test]
    fn test_prompt_reports_limited_tech_access() {
        let mut draft = PersonaDraft::anonymous();
        draft.has_internet = false;
        let persona = Persona::from_draft(draft);

        let prompt = GuidanceAgent.build_prompt(&persona, "Como começar?");
        assert!(prompt.contains("Acesso à tecnologia: Limitado"));
    }

    #[test]
    fn test_prompt_includes_readiness() {
        let persona = Persona::from_draft(PersonaDraft::anonymous());
        let prompt = GuidanceAgent.build_prompt(&persona, "Como começar?");
        assert!(prompt.contains("Nível de prontidão: exploring"));
    }
}
