//! Career exploration agent: maps a profile to green job opportunities.

use crate::types::{Language, Persona};

use super::{persona_context, SpecialistAgent};

pub struct CareerAgent;

impl SpecialistAgent for CareerAgent {
    fn name(&self) -> &'static str {
        "career_agent"
    }

    fn temperature(&self) -> Option<f64> {
        Some(0.6)
    }

    fn max_tokens(&self) -> Option<u32> {
        Some(600)
    }

    fn build_prompt(&self, persona: &Persona, message: &str) -> String {
        format!(
            "Como especialista em carreiras verdes no Brasil, forneça orientação personalizada \
             para este jovem:\n\n\
             {}\n\
             Solicitação: \"{}\"\n\n\
             Considerando o perfil do jovem, forneça:\n\n\
             1. Análise das oportunidades de carreira verde mais adequadas para seu perfil\n\
             2. Setores em crescimento no Brasil que se alinham com seus interesses\n\
             3. Papéis de entrada (junior/trainee) disponíveis em sua região\n\
             4. Requisitos realistas considerando sua educação e experiência atual\n\
             5. Perspectivas de crescimento e desenvolvimento na carreira\n\
             6. Empresas ou setores específicos para focar em {}\n\n\
             Seja específico sobre:\n\
             - Oportunidades em energia renovável, gestão de resíduos, agricultura sustentável\n\
             - Salários típicos para posições iniciantes\n\
             - Progressão de carreira realista\n\
             - Como superar lacunas de habilidades\n\n\
             Mantenha o tom encorajador e prático, focando em próximos passos concretos.",
            persona_context(persona),
            message,
            persona.profile.location_state.uf(),
        )
    }

    fn system_prompt(&self, language: Language) -> &'static str {
        match language {
            Language::PtBr => {
                "Você é um especialista em carreiras verdes no Brasil, com foco em orientar \
                 jovens de 16-24 anos.\n\n\
                 Expertise:\n\
                 - Mercado de trabalho verde brasileiro\n\
                 - Oportunidades regionais por estado\n\
                 - Requisitos de entrada para diferentes setores\n\
                 - Progressão de carreira realista\n\
                 - Salários e benefícios típicos\n\
                 - Programas de capacitação disponíveis\n\n\
                 Abordagem:\n\
                 - Seja prático e realista sobre oportunidades\n\
                 - Considere limitações socioeconômicas\n\
                 - Foque em setores em crescimento no Brasil\n\
                 - Adapte recomendações à região do jovem\n\
                 - Seja encorajador mas honesto sobre desafios\n\
                 - Use linguagem acessível e empática\n\n\
                 Setores prioritários: energia renovável, gestão de resíduos, agricultura \
                 sustentável, veículos elétricos, silvicultura, construção sustentável, \
                 consultoria ESG."
            }
            Language::En => {
                "You are a green career specialist in Brazil, focused on guiding youth aged 16-24.\n\n\
                 Expertise:\n\
                 - Brazilian green job market\n\
                 - Regional opportunities by state\n\
                 - Entry requirements for different sectors\n\
                 - Realistic career progression\n\
                 - Typical salaries and benefits\n\
                 - Available training programs\n\n\
                 Approach:\n\
                 - Be practical and realistic about opportunities\n\
                 - Consider socioeconomic limitations\n\
                 - Focus on growing sectors in Brazil\n\
                 - Adapt recommendations to the youth's region\n\
                 - Be encouraging but honest about challenges\n\
                 - Use accessible and empathetic language\n\n\
                 Priority sectors: renewable energy, waste management, sustainable agriculture, \
                 electric vehicles, forestry, sustainable construction, ESG consulting."
            }
        }
    }
}
