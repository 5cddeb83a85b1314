//! Learning guidance agent: course and training recommendations.

use crate::types::{Language, Persona};

use super::{persona_context, SpecialistAgent};

pub struct LearningAgent;

impl SpecialistAgent for LearningAgent {
    fn name(&self) -> &'static str {
        "learning_agent"
    }

    fn max_tokens(&self) -> Option<u32> {
        Some(800)
    }

    fn build_prompt(&self, persona: &Persona, message: &str) -> String {
        let profile = &persona.profile;
        format!(
            "Como especialista em educação e capacitação para carreiras verdes no Brasil, \
             forneça recomendações personalizadas:\n\n\
             {}\n\
             Solicitação: \"{}\"\n\n\
             Considerando o perfil do jovem, recomende:\n\n\
             1. Cursos online gratuitos em plataformas brasileiras (SENAI, SEBRAE, FGV) e \
                MOOCs internacionais com certificação\n\
             2. Programas presenciais e workshops em {}\n\
             3. Certificações reconhecidas no mercado verde brasileiro, com custos e \
                pré-requisitos realistas\n\
             4. Desenvolvimento de habilidades práticas: projetos hands-on, voluntariado, \
                experiências de campo\n\
             5. Sequência de aprendizado: ordem recomendada dos cursos e marcos de progresso\n\n\
             Considere suas limitações de tempo ({}h/semana) e orçamento (R${}/mês).",
            persona_context(persona),
            message,
            profile.location_state.uf(),
            profile.time_availability,
            profile.budget_constraint,
        )
    }

    fn system_prompt(&self, language: Language) -> &'static str {
        match language {
            Language::PtBr => {
                "Você é um especialista em educação e capacitação para carreiras verdes no \
                 Brasil, focado em jovens de 16-24 anos com diferentes níveis de preparação.\n\n\
                 Expertise:\n\
                 - Programas de capacitação brasileiros (SENAI, SEBRAE, SENAR, etc.)\n\
                 - Cursos online gratuitos e pagos\n\
                 - Certificações reconhecidas no mercado verde\n\
                 - Oportunidades de aprendizado prático\n\
                 - Cronogramas realistas de estudo\n\n\
                 Princípios:\n\
                 - Considere limitações de tempo e orçamento\n\
                 - Priorize cursos gratuitos ou de baixo custo\n\
                 - Adapte à região e disponibilidade local\n\
                 - Sugira progressão lógica de conhecimento\n\
                 - Seja realista sobre pré-requisitos\n\
                 - Enfatize certificações reconhecidas pelo mercado\n\n\
                 Áreas de foco: energia renovável, gestão ambiental, agricultura sustentável, \
                 economia circular, ESG, tecnologias limpas, construção verde."
            }
            Language::En => {
                "You are a learning specialist for green careers in Brazil, focused on youth \
                 aged 16-24 with different preparation levels.\n\n\
                 Expertise:\n\
                 - Brazilian training programs (SENAI, SEBRAE, SENAR, etc.)\n\
                 - Free and paid online courses\n\
                 - Market-recognized certifications\n\
                 - Practical learning opportunities\n\
                 - Realistic study schedules\n\n\
                 Principles:\n\
                 - Consider time and budget limitations\n\
                 - Prioritize free or low-cost courses\n\
                 - Adapt to region and local availability\n\
                 - Suggest logical knowledge progression\n\
                 - Be realistic about prerequisites\n\
                 - Emphasize market-recognized certifications\n\n\
                 Focus areas: renewable energy, environmental management, sustainable \
                 agriculture, circular economy, ESG, clean technologies, green construction."
            }
        }
    }
}
