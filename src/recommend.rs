//! Relevance scoring of catalog entries against a persona profile.
//!
//! Scores are additive over profile signals (interest match, location,
//! education, cost, access) and clamped to 1.0. Entries under the
//! configured minimum score are dropped, the rest come back sorted by
//! score with human-readable match reasons in Portuguese.

use serde::Serialize;

use crate::config::GuidanceSettings;
use crate::store::Catalog;
use crate::types::{GreenJob, Persona, TrainingProgram};

/// A scored job match.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecommendation {
    pub id: String,
    pub title: String,
    pub company: String,
    pub category: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    pub experience_required: u8,
    pub remote_possible: bool,
    pub relevance_score: f64,
    pub match_reasons: Vec<String>,
}

/// A scored training match.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingRecommendation {
    pub id: String,
    pub title: String,
    pub provider: String,
    pub duration_hours: u32,
    pub cost_brl: u32,
    pub is_free: bool,
    pub online_available: bool,
    pub relevance_score: f64,
    pub match_reasons: Vec<String>,
}

/// Scores catalog entries for a persona.
pub struct Recommender {
    catalog: Catalog,
    settings: GuidanceSettings,
}

impl Recommender {
    pub fn new(catalog: Catalog, settings: GuidanceSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Job recommendations for a persona, best match first.
    pub fn jobs_for(&self, persona: &Persona, limit: usize) -> (Vec<JobRecommendation>, usize) {
        let mut scored: Vec<JobRecommendation> = self
            .catalog
            .jobs
            .iter()
            .map(|job| score_job(job, persona))
            .filter(|r| r.relevance_score >= self.settings.min_relevance_score)
            .collect();

        scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        let total = scored.len();
        scored.truncate(limit.min(self.settings.max_recommendations));
        (scored, total)
    }

    /// Training recommendations for a persona, best match first.
    pub fn training_for(
        &self,
        persona: &Persona,
        limit: usize,
    ) -> (Vec<TrainingRecommendation>, usize) {
        let mut scored: Vec<TrainingRecommendation> = self
            .catalog
            .programs
            .iter()
            .map(|program| score_training(program, persona))
            .filter(|r| r.relevance_score >= self.settings.min_relevance_score)
            .collect();

        scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        let total = scored.len();
        scored.truncate(limit.min(self.settings.max_recommendations));
        (scored, total)
    }
}

fn score_job(job: &GreenJob, persona: &Persona) -> JobRecommendation {
    let profile = &persona.profile;
    let mut score: f64 = 0.2;
    let mut reasons = Vec::new();

    if profile.green_interests.contains(&job.category) {
        score += 0.4;
        reasons.push(format!("Interesse em {}", job.category.display_name_pt()));
    }

    if job.location_state == profile.location_state {
        score += 0.2;
        reasons.push("Localização compatível".to_string());
    } else if job.remote_possible {
        score += 0.1;
        reasons.push("Trabalho remoto disponível".to_string());
    }

    if profile.education_level.meets(job.min_education) {
        score += 0.2;
        reasons.push("Nível de formação adequado".to_string());
    }

    if job.experience_required == 0 {
        score += 0.1;
        reasons.push("Posição de entrada".to_string());
    }

    let salary_range = match (job.salary_min, job.salary_max) {
        (Some(min), Some(max)) => Some(format!("R$ {} - R$ {}", min, max)),
        (Some(min), None) => Some(format!("A partir de R$ {}", min)),
        _ => None,
    };

    JobRecommendation {
        id: job.id.clone(),
        title: job.title.clone(),
        company: job.company.clone(),
        category: job.category.slug().to_string(),
        location: format!("{}, {}", job.location_city, job.location_state.uf()),
        salary_range,
        experience_required: job.experience_required,
        remote_possible: job.remote_possible,
        relevance_score: score.min(1.0),
        match_reasons: reasons,
    }
}

fn score_training(program: &TrainingProgram, persona: &Persona) -> TrainingRecommendation {
    let profile = &persona.profile;
    let mut score: f64 = 0.2;
    let mut reasons = Vec::new();

    if profile.green_interests.contains(&program.category) {
        score += 0.4;
        reasons.push(format!(
            "Alinhado com interesse em {}",
            program.category.display_name_pt()
        ));
    }

    if program.is_free {
        score += 0.2;
        reasons.push("Gratuito".to_string());
    } else if program.cost_brl <= profile.budget_constraint {
        score += 0.15;
        reasons.push("Dentro do orçamento".to_string());
    }

    if program.online_available && profile.has_internet {
        score += 0.2;
        reasons.push("Disponível online".to_string());
    } else if program.location_state == Some(profile.location_state) {
        score += 0.2;
        reasons.push("Disponível na sua região".to_string());
    }

    if profile.education_level.meets(program.min_education) {
        score += 0.1;
        reasons.push("Pré-requisitos atendidos".to_string());
    }

    TrainingRecommendation {
        id: program.id.clone(),
        title: program.title.clone(),
        provider: program.provider.clone(),
        duration_hours: program.duration_hours,
        cost_brl: program.cost_brl,
        is_free: program.is_free,
        online_available: program.online_available,
        relevance_score: score.min(1.0),
        match_reasons: reasons,
    }
}
