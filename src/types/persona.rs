//! Persona model for the young people the service guides.
//!
//! A persona captures who is asking: age, location, education, digital
//! access, green-economy interests, constraints, and goals. Agents fold
//! these fields into the prompt context so replies fit the person.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::catalog::JobCategory;

// ─────────────────────────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────────────────────────

/// Supported reply languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English.
    #[serde(rename = "en")]
    En,
    /// Brazilian Portuguese, the default.
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Language {
    /// BCP 47 tag used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::PtBr => "pt-BR",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::PtBr
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" => Ok(Language::En),
            "pt-br" | "pt" => Ok(Language::PtBr),
            _ => Err(format!("Unknown language '{}'. Valid: en, pt-BR", s)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Readiness Level
// ─────────────────────────────────────────────────────────────────

/// How far along a persona is toward a green career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessLevel {
    /// Just starting to explore.
    Exploring,
    /// Interested but needs guidance.
    Interested,
    /// Actively preparing or learning.
    Preparing,
    /// Ready for opportunities.
    Ready,
    /// Has some experience already.
    Experienced,
}

impl ReadinessLevel {
    /// Slug used on the wire and in analytics breakdowns.
    pub fn slug(&self) -> &'static str {
        match self {
            ReadinessLevel::Exploring => "exploring",
            ReadinessLevel::Interested => "interested",
            ReadinessLevel::Preparing => "preparing",
            ReadinessLevel::Ready => "ready",
            ReadinessLevel::Experienced => "experienced",
        }
    }

    /// All levels in progression order.
    pub fn all() -> &'static [ReadinessLevel] {
        &[
            ReadinessLevel::Exploring,
            ReadinessLevel::Interested,
            ReadinessLevel::Preparing,
            ReadinessLevel::Ready,
            ReadinessLevel::Experienced,
        ]
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for ReadinessLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ReadinessLevel::all()
            .iter()
            .find(|level| level.slug() == lower)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown readiness level '{}'. Valid: exploring, interested, preparing, ready, experienced",
                    s
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────
// Education Level
// ─────────────────────────────────────────────────────────────────

/// Education levels for persona profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Primary,
    Secondary,
    Technical,
    Undergraduate,
    Graduate,
}

impl EducationLevel {
    /// Slug used on the wire.
    pub fn slug(&self) -> &'static str {
        match self {
            EducationLevel::Primary => "primary",
            EducationLevel::Secondary => "secondary",
            EducationLevel::Technical => "technical",
            EducationLevel::Undergraduate => "undergraduate",
            EducationLevel::Graduate => "graduate",
        }
    }

    /// Whether this level satisfies a minimum requirement.
    ///
    /// Ordering follows the Brazilian track: primary < secondary <
    /// technical < undergraduate < graduate.
    pub fn meets(&self, minimum: EducationLevel) -> bool {
        self >= &minimum
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

// ─────────────────────────────────────────────────────────────────
// Brazilian State
// ─────────────────────────────────────────────────────────────────

/// Brazilian federative units, serialized as the two-letter UF code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrazilState {
    AC, AL, AP, AM, BA, CE, DF, ES, GO, MA, MT, MS, MG, PA,
    PB, PR, PE, PI, RJ, RN, RS, RO, RR, SC, SP, SE, TO,
}

impl BrazilState {
    /// Two-letter UF code.
    pub fn uf(&self) -> &'static str {
        match self {
            BrazilState::AC => "AC",
            BrazilState::AL => "AL",
            BrazilState::AP => "AP",
            BrazilState::AM => "AM",
            BrazilState::BA => "BA",
            BrazilState::CE => "CE",
            BrazilState::DF => "DF",
            BrazilState::ES => "ES",
            BrazilState::GO => "GO",
            BrazilState::MA => "MA",
            BrazilState::MT => "MT",
            BrazilState::MS => "MS",
            BrazilState::MG => "MG",
            BrazilState::PA => "PA",
            BrazilState::PB => "PB",
            BrazilState::PR => "PR",
            BrazilState::PE => "PE",
            BrazilState::PI => "PI",
            BrazilState::RJ => "RJ",
            BrazilState::RN => "RN",
            BrazilState::RS => "RS",
            BrazilState::RO => "RO",
            BrazilState::RR => "RR",
            BrazilState::SC => "SC",
            BrazilState::SP => "SP",
            BrazilState::SE => "SE",
            BrazilState::TO => "TO",
        }
    }

    /// All 27 federative units.
    pub fn all() -> &'static [BrazilState] {
        use BrazilState::*;
        &[
            AC, AL, AP, AM, BA, CE, DF, ES, GO, MA, MT, MS, MG, PA,
            PB, PR, PE, PI, RJ, RN, RS, RO, RR, SC, SP, SE, TO,
        ]
    }
}

impl fmt::Display for BrazilState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uf())
    }
}

impl FromStr for BrazilState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        BrazilState::all()
            .iter()
            .find(|state| state.uf() == upper)
            .copied()
            .ok_or_else(|| format!("Unknown Brazilian state '{}'", s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// Attributes supplied when creating or embedding a persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaDraft {
    /// Persona name or identifier.
    pub name: String,

    /// Age, bounded to the 16-24 youth bracket.
    pub age: u8,

    /// Brazilian state (UF).
    pub location_state: BrazilState,

    /// City name.
    pub location_city: String,

    /// Current education level.
    pub education_level: EducationLevel,

    /// Preferred reply language.
    #[serde(default)]
    pub preferred_language: Language,

    // Digital access
    /// Has access to a smartphone.
    #[serde(default = "default_true")]
    pub has_smartphone: bool,

    /// Has regular internet access.
    #[serde(default = "default_true")]
    pub has_internet: bool,

    /// Tech comfort on a 1-5 scale.
    #[serde(default = "default_tech_comfort")]
    pub tech_comfort_level: u8,

    // Green interests
    /// Green job categories of interest.
    #[serde(default)]
    pub green_interests: Vec<JobCategory>,

    /// Current readiness for green careers.
    pub readiness_level: ReadinessLevel,

    // Constraints and goals
    /// Hours per week available, 1-40.
    #[serde(default = "default_time_availability")]
    pub time_availability: u8,

    /// Monthly budget in BRL.
    #[serde(default)]
    pub budget_constraint: u32,

    /// Career aspiration keywords.
    #[serde(default)]
    pub career_goals: Vec<String>,

    /// Preferred learning approach.
    #[serde(default = "default_learning_style")]
    pub learning_style: String,

    /// What motivates this persona.
    #[serde(default)]
    pub motivation_factors: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_tech_comfort() -> u8 {
    3
}

fn default_time_availability() -> u8 {
    10
}

fn default_learning_style() -> String {
    "mixed".to_string()
}

impl PersonaDraft {
    /// Check field bounds before a draft is stored or used in a prompt.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::request_invalid("persona name cannot be empty"));
        }
        if !(16..=24).contains(&self.age) {
            return Err(Error::request_invalid("age must be between 16 and 24"));
        }
        if !(1..=5).contains(&self.tech_comfort_level) {
            return Err(Error::request_invalid(
                "tech_comfort_level must be between 1 and 5",
            ));
        }
        if !(1..=40).contains(&self.time_availability) {
            return Err(Error::request_invalid(
                "time_availability must be between 1 and 40 hours per week",
            ));
        }
        Ok(())
    }

    /// Anonymous fallback used when a chat request carries no persona.
    pub fn anonymous() -> Self {
        Self {
            name: "Jovem Anônimo".to_string(),
            age: 20,
            location_state: BrazilState::SP,
            location_city: "São Paulo".to_string(),
            education_level: EducationLevel::Secondary,
            preferred_language: Language::PtBr,
            has_smartphone: true,
            has_internet: true,
            tech_comfort_level: 3,
            green_interests: vec![],
            readiness_level: ReadinessLevel::Exploring,
            time_availability: 10,
            budget_constraint: 0,
            career_goals: vec![],
            learning_style: default_learning_style(),
            motivation_factors: vec![],
        }
    }
}

/// A stored persona with identity and interaction metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Unique persona identifier.
    pub id: Uuid,

    #[serde(flatten)]
    pub profile: PersonaDraft,

    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (UTC).
    pub updated_at: DateTime<Utc>,

    /// Number of assistant interactions recorded.
    #[serde(default)]
    pub interaction_count: u64,

    /// Timestamp of the most recent interaction.
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Persona {
    /// Build a fresh persona from a validated draft.
    pub fn from_draft(draft: PersonaDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile: draft,
            created_at: now,
            updated_at: now,
            interaction_count: 0,
            last_interaction: None,
        }
    }

    /// Record one more assistant interaction.
    pub fn touch_interaction(&mut self) {
        let now = Utc::now();
        self.interaction_count += 1;
        self.last_interaction = Some(now);
        self.updated_at = now;
    }
}

/// Partial update for a stored persona. Unset fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaUpdate {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub location_state: Option<BrazilState>,
    pub location_city: Option<String>,
    pub education_level: Option<EducationLevel>,
    pub preferred_language: Option<Language>,
    pub has_smartphone: Option<bool>,
    pub has_internet: Option<bool>,
    pub tech_comfort_level: Option<u8>,
    pub green_interests: Option<Vec<JobCategory>>,
    pub readiness_level: Option<ReadinessLevel>,
    pub time_availability: Option<u8>,
    pub budget_constraint: Option<u32>,
    pub career_goals: Option<Vec<String>>,
    pub learning_style: Option<String>,
    pub motivation_factors: Option<Vec<String>>,
}

impl PersonaUpdate {
    /// Apply the set fields onto a profile, then re-validate it.
    ///
    /// The fields land on a working copy first; the profile is only
    /// replaced once the updated draft validates, so a rejected update
    /// leaves it untouched.
    pub fn apply(self, profile: &mut PersonaDraft) -> Result<()> {
        let mut updated = profile.clone();
        if let Some(v) = self.name {
            updated.name = v;
        }
        if let Some(v) = self.age {
            updated.age = v;
        }
        if let Some(v) = self.location_state {
            updated.location_state = v;
        }
        if let Some(v) = self.location_city {
            updated.location_city = v;
        }
        if let Some(v) = self.education_level {
            updated.education_level = v;
        }
        if let Some(v) = self.preferred_language {
            updated.preferred_language = v;
        }
        if let Some(v) = self.has_smartphone {
            updated.has_smartphone = v;
        }
        if let Some(v) = self.has_internet {
            updated.has_internet = v;
        }
        if let Some(v) = self.tech_comfort_level {
            updated.tech_comfort_level = v;
        }
        if let Some(v) = self.green_interests {
            updated.green_interests = v;
        }
        if let Some(v) = self.readiness_level {
            updated.readiness_level = v;
        }
        if let Some(v) = self.time_availability {
            updated.time_availability = v;
        }
        if let Some(v) = self.budget_constraint {
            updated.budget_constraint = v;
        }
        if let Some(v) = self.career_goals {
            updated.career_goals = v;
        }
        if let Some(v) = self.learning_style {
            updated.learning_style = v;
        }
        if let Some(v) = self.motivation_factors {
            updated.motivation_factors = v;
        }
        updated.validate()?;
        *profile = updated;
        Ok(())
    }
}
