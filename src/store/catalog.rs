//! Built-in catalog of green jobs, training programs, and awareness content.
//!
//! The catalog ships with the binary. Entries focus on entry-level roles and
//! low-cost training reachable for Brazilian youth.

use serde::{Deserialize, Serialize};

use crate::types::{
    BrazilState, EducationLevel, GreenJob, JobCategory, Language, TrainingProgram,
};

/// Short educational piece about the green economy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwarenessContent {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// "article", "video", or "infographic".
    pub content_type: String,
    pub reading_time_minutes: u32,
    pub topics: Vec<String>,
    pub language: Language,
}

/// Static catalog queried by the learning and recommendation endpoints.
pub struct Catalog {
    pub jobs: Vec<GreenJob>,
    pub programs: Vec<TrainingProgram>,
    pub content: Vec<AwarenessContent>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            jobs: builtin_jobs(),
            programs: builtin_programs(),
            content: builtin_content(),
        }
    }

    /// Training programs matching the given filters.
    pub fn filter_programs(
        &self,
        category: Option<JobCategory>,
        free_only: bool,
        location_state: Option<BrazilState>,
        limit: usize,
    ) -> Vec<&TrainingProgram> {
        self.programs
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| !free_only || p.is_free)
            .filter(|p| {
                location_state.map_or(true, |state| {
                    p.online_available || p.location_state == Some(state)
                })
            })
            .take(limit)
            .collect()
    }

    /// Awareness content matching topic and language filters.
    pub fn filter_content(
        &self,
        topic: Option<&str>,
        language: Option<Language>,
        limit: usize,
    ) -> Vec<&AwarenessContent> {
        let topic = topic.map(str::to_lowercase);
        self.content
            .iter()
            .filter(|c| {
                topic.as_deref().map_or(true, |t| {
                    c.topics.iter().any(|topic| topic.to_lowercase().contains(t))
                        || c.title.to_lowercase().contains(t)
                })
            })
            .filter(|c| language.map_or(true, |l| c.language == l))
            .take(limit)
            .collect()
    }
}

fn builtin_jobs() -> Vec<GreenJob> {
    vec![
        GreenJob {
            id: "job_001".to_string(),
            title: "Técnico em Energia Solar Júnior".to_string(),
            category: JobCategory::RenewableEnergy,
            description: "Instalação e manutenção de painéis solares residenciais. \
                          Treinamento em campo com equipe experiente."
                .to_string(),
            location_state: BrazilState::SP,
            location_city: "São Paulo".to_string(),
            min_education: EducationLevel::Secondary,
            required_skills: vec![
                "eletricidade básica".to_string(),
                "trabalho em altura".to_string(),
            ],
            preferred_skills: vec!["NR-35".to_string(), "NR-10".to_string()],
            experience_required: 0,
            employment_type: "full_time".to_string(),
            salary_min: Some(1800),
            salary_max: Some(2500),
            remote_possible: false,
            company: "SolarTech Brasil".to_string(),
            contact_info: "vagas@solartech.com.br".to_string(),
            tags: vec!["energia solar".to_string(), "iniciante".to_string()],
        },
        GreenJob {
            id: "job_002".to_string(),
            title: "Assistente de Gestão Ambiental".to_string(),
            category: JobCategory::EsgConsulting,
            description: "Apoio a projetos de licenciamento ambiental e relatórios \
                          de sustentabilidade para pequenas empresas."
                .to_string(),
            location_state: BrazilState::SP,
            location_city: "Campinas".to_string(),
            min_education: EducationLevel::Secondary,
            required_skills: vec![
                "informática básica".to_string(),
                "redação".to_string(),
            ],
            preferred_skills: vec!["excel".to_string()],
            experience_required: 0,
            employment_type: "full_time".to_string(),
            salary_min: Some(1600),
            salary_max: Some(2200),
            remote_possible: true,
            company: "EcoConsulting".to_string(),
            contact_info: "rh@ecoconsulting.com.br".to_string(),
            tags: vec!["meio ambiente".to_string(), "iniciante".to_string()],
        },
        GreenJob {
            id: "job_003".to_string(),
            title: "Auxiliar de Reciclagem e Triagem".to_string(),
            category: JobCategory::WasteManagement,
            description: "Triagem de materiais recicláveis em cooperativa, com \
                          oportunidade de crescimento para operação de prensa."
                .to_string(),
            location_state: BrazilState::RJ,
            location_city: "Rio de Janeiro".to_string(),
            min_education: EducationLevel::Primary,
            required_skills: vec!["organização".to_string()],
            preferred_skills: vec![],
            experience_required: 0,
            employment_type: "full_time".to_string(),
            salary_min: Some(1400),
            salary_max: Some(1800),
            remote_possible: false,
            company: "Coopereciclar RJ".to_string(),
            contact_info: "contato@coopereciclar.org.br".to_string(),
            tags: vec!["reciclagem".to_string(), "economia circular".to_string()],
        },
        GreenJob {
            id: "job_004".to_string(),
            title: "Jovem Aprendiz em Agricultura Urbana".to_string(),
            category: JobCategory::SustainableAgriculture,
            description: "Programa de aprendizagem em horta comunitária: cultivo \
                          orgânico, compostagem e venda direta."
                .to_string(),
            location_state: BrazilState::MG,
            location_city: "Belo Horizonte".to_string(),
            min_education: EducationLevel::Primary,
            required_skills: vec!["interesse em agricultura".to_string()],
            preferred_skills: vec![],
            experience_required: 0,
            employment_type: "apprenticeship".to_string(),
            salary_min: Some(1100),
            salary_max: Some(1400),
            remote_possible: false,
            company: "Horta Viva BH".to_string(),
            contact_info: "aprendiz@hortaviva.org.br".to_string(),
            tags: vec!["agricultura".to_string(), "jovem aprendiz".to_string()],
        },
        GreenJob {
            id: "job_005".to_string(),
            title: "Monitor de Ecoturismo".to_string(),
            category: JobCategory::Forestry,
            description: "Condução de trilhas e atividades de educação ambiental \
                          para grupos escolares em unidade de conservação."
                .to_string(),
            location_state: BrazilState::BA,
            location_city: "Salvador".to_string(),
            min_education: EducationLevel::Secondary,
            required_skills: vec![
                "comunicação".to_string(),
                "primeiros socorros".to_string(),
            ],
            preferred_skills: vec!["inglês básico".to_string()],
            experience_required: 0,
            employment_type: "part_time".to_string(),
            salary_min: Some(1200),
            salary_max: Some(1900),
            remote_possible: false,
            company: "Trilhas da Bahia".to_string(),
            contact_info: "equipe@trilhasdabahia.com.br".to_string(),
            tags: vec!["ecoturismo".to_string(), "educação ambiental".to_string()],
        },
    ]
}

fn builtin_programs() -> Vec<TrainingProgram> {
    vec![
        TrainingProgram {
            id: "program_001".to_string(),
            title: "Instalação de Painéis Solares".to_string(),
            description: "Curso prático de instalação fotovoltaica residencial, \
                          do dimensionamento à conexão."
                .to_string(),
            provider: "SENAI".to_string(),
            category: JobCategory::RenewableEnergy,
            duration_hours: 40,
            difficulty_level: 2,
            cost_brl: 0,
            is_free: true,
            prerequisites: vec!["ensino fundamental completo".to_string()],
            min_education: EducationLevel::Primary,
            online_available: false,
            location_state: Some(BrazilState::SP),
            location_city: Some("São Paulo".to_string()),
            skills_gained: vec![
                "instalação fotovoltaica".to_string(),
                "eletricidade básica".to_string(),
            ],
            certification: Some("Certificado SENAI".to_string()),
            contact_info: "cursos@senai.br".to_string(),
        },
        TrainingProgram {
            id: "program_002".to_string(),
            title: "Gestão de Resíduos Sólidos".to_string(),
            description: "Fundamentos de coleta seletiva, logística reversa e \
                          economia circular para pequenos negócios."
                .to_string(),
            provider: "SEBRAE".to_string(),
            category: JobCategory::WasteManagement,
            duration_hours: 24,
            difficulty_level: 1,
            cost_brl: 150,
            is_free: false,
            prerequisites: vec![],
            min_education: EducationLevel::Primary,
            online_available: true,
            location_state: None,
            location_city: None,
            skills_gained: vec![
                "gestão de resíduos".to_string(),
                "economia circular".to_string(),
            ],
            certification: Some("Certificado SEBRAE".to_string()),
            contact_info: "atendimento@sebrae.com.br".to_string(),
        },
        TrainingProgram {
            id: "program_003".to_string(),
            title: "Introdução à Agricultura Orgânica".to_string(),
            description: "Cultivo sem agrotóxicos, compostagem e manejo de hortas \
                          urbanas, com aulas gravadas e apostila."
                .to_string(),
            provider: "SENAR".to_string(),
            category: JobCategory::SustainableAgriculture,
            duration_hours: 30,
            difficulty_level: 1,
            cost_brl: 0,
            is_free: true,
            prerequisites: vec![],
            min_education: EducationLevel::Primary,
            online_available: true,
            location_state: None,
            location_city: None,
            skills_gained: vec![
                "cultivo orgânico".to_string(),
                "compostagem".to_string(),
            ],
            certification: Some("Certificado SENAR".to_string()),
            contact_info: "ead@senar.org.br".to_string(),
        },
        TrainingProgram {
            id: "program_004".to_string(),
            title: "Educação Ambiental para Jovens".to_string(),
            description: "Formação de multiplicadores ambientais: mudanças \
                          climáticas, biodiversidade e ação comunitária."
                .to_string(),
            provider: "Instituto Akatu".to_string(),
            category: JobCategory::EsgConsulting,
            duration_hours: 20,
            difficulty_level: 1,
            cost_brl: 0,
            is_free: true,
            prerequisites: vec![],
            min_education: EducationLevel::Primary,
            online_available: true,
            location_state: None,
            location_city: None,
            skills_gained: vec![
                "educação ambiental".to_string(),
                "comunicação".to_string(),
            ],
            certification: None,
            contact_info: "contato@akatu.org.br".to_string(),
        },
        TrainingProgram {
            id: "program_005".to_string(),
            title: "Eletricista com Ênfase em Energias Renováveis".to_string(),
            description: "Formação completa de eletricista com módulos de energia \
                          solar e eólica, incluindo NR-10."
                .to_string(),
            provider: "SENAI".to_string(),
            category: JobCategory::RenewableEnergy,
            duration_hours: 160,
            difficulty_level: 3,
            cost_brl: 450,
            is_free: false,
            prerequisites: vec!["ensino médio em andamento".to_string()],
            min_education: EducationLevel::Secondary,
            online_available: false,
            location_state: Some(BrazilState::MG),
            location_city: Some("Belo Horizonte".to_string()),
            skills_gained: vec![
                "instalações elétricas".to_string(),
                "energia solar".to_string(),
                "NR-10".to_string(),
            ],
            certification: Some("Certificado SENAI".to_string()),
            contact_info: "cursos@senai.br".to_string(),
        },
    ]
}

fn builtin_content() -> Vec<AwarenessContent> {
    vec![
        AwarenessContent {
            id: "content_001".to_string(),
            title: "O que são Empregos Verdes?".to_string(),
            summary: "Introdução ao conceito de economia verde e aos setores que \
                      mais contratam jovens no Brasil."
                .to_string(),
            content_type: "article".to_string(),
            reading_time_minutes: 5,
            topics: vec![
                "economia verde".to_string(),
                "carreiras".to_string(),
            ],
            language: Language::PtBr,
        },
        AwarenessContent {
            id: "content_002".to_string(),
            title: "Energia Solar no Brasil".to_string(),
            summary: "Panorama do crescimento da energia solar e das oportunidades \
                      de trabalho no setor."
                .to_string(),
            content_type: "video".to_string(),
            reading_time_minutes: 15,
            topics: vec![
                "energia solar".to_string(),
                "energia renovável".to_string(),
            ],
            language: Language::PtBr,
        },
        AwarenessContent {
            id: "content_003".to_string(),
            title: "Economia Circular no Dia a Dia".to_string(),
            summary: "Como a reciclagem e o reaproveitamento geram renda em \
                      comunidades brasileiras."
                .to_string(),
            content_type: "article".to_string(),
            reading_time_minutes: 7,
            topics: vec![
                "reciclagem".to_string(),
                "economia circular".to_string(),
            ],
            language: Language::PtBr,
        },
        AwarenessContent {
            id: "content_004".to_string(),
            title: "Green Jobs: A Global Overview".to_string(),
            summary: "How the transition to a low-carbon economy is creating new \
                      career paths worldwide."
                .to_string(),
            content_type: "article".to_string(),
            reading_time_minutes: 8,
            topics: vec![
                "green economy".to_string(),
                "careers".to_string(),
            ],
            language: Language::En,
        },
    ]
}
