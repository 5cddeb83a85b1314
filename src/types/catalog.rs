//! Green job and training program catalog types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::persona::{BrazilState, EducationLevel};

// ─────────────────────────────────────────────────────────────────
// Job Category
// ─────────────────────────────────────────────────────────────────

/// Green job categories present in the Brazilian market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    Solar,
    Wind,
    WasteManagement,
    SustainableAgriculture,
    ElectricVehicles,
    Forestry,
    EsgConsulting,
    RenewableEnergy,
    WaterManagement,
    GreenConstruction,
}

impl JobCategory {
    /// Slug used on the wire and in analytics breakdowns.
    pub fn slug(&self) -> &'static str {
        match self {
            JobCategory::Solar => "solar",
            JobCategory::Wind => "wind",
            JobCategory::WasteManagement => "waste_management",
            JobCategory::SustainableAgriculture => "sustainable_agriculture",
            JobCategory::ElectricVehicles => "electric_vehicles",
            JobCategory::Forestry => "forestry",
            JobCategory::EsgConsulting => "esg_consulting",
            JobCategory::RenewableEnergy => "renewable_energy",
            JobCategory::WaterManagement => "water_management",
            JobCategory::GreenConstruction => "green_construction",
        }
    }

    /// Human-readable name in Portuguese, used in prompt context.
    pub fn display_name_pt(&self) -> &'static str {
        match self {
            JobCategory::Solar => "Energia Solar",
            JobCategory::Wind => "Energia Eólica",
            JobCategory::WasteManagement => "Gestão de Resíduos",
            JobCategory::SustainableAgriculture => "Agricultura Sustentável",
            JobCategory::ElectricVehicles => "Veículos Elétricos",
            JobCategory::Forestry => "Manejo Florestal",
            JobCategory::EsgConsulting => "Consultoria ESG",
            JobCategory::RenewableEnergy => "Energias Renováveis",
            JobCategory::WaterManagement => "Gestão Hídrica",
            JobCategory::GreenConstruction => "Construção Sustentável",
        }
    }

    /// All categories.
    pub fn all() -> &'static [JobCategory] {
        &[
            JobCategory::Solar,
            JobCategory::Wind,
            JobCategory::WasteManagement,
            JobCategory::SustainableAgriculture,
            JobCategory::ElectricVehicles,
            JobCategory::Forestry,
            JobCategory::EsgConsulting,
            JobCategory::RenewableEnergy,
            JobCategory::WaterManagement,
            JobCategory::GreenConstruction,
        ]
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for JobCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        JobCategory::all()
            .iter()
            .find(|c| c.slug() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown job category '{}'", s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Green Job
// ─────────────────────────────────────────────────────────────────

/// A green job opportunity in the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenJob {
    /// Unique job identifier.
    pub id: String,

    /// Job title.
    pub title: String,

    /// Green job category.
    pub category: JobCategory,

    /// Job description.
    pub description: String,

    /// Location state (UF).
    pub location_state: BrazilState,

    /// Location city.
    pub location_city: String,

    // Requirements
    /// Minimum education required.
    pub min_education: EducationLevel,

    /// Required skills.
    #[serde(default)]
    pub required_skills: Vec<String>,

    /// Preferred skills.
    #[serde(default)]
    pub preferred_skills: Vec<String>,

    /// Years of experience required.
    #[serde(default)]
    pub experience_required: u8,

    // Job details
    /// Employment type (full-time, part-time, apprenticeship).
    pub employment_type: String,

    /// Minimum salary in BRL.
    #[serde(default)]
    pub salary_min: Option<u32>,

    /// Maximum salary in BRL.
    #[serde(default)]
    pub salary_max: Option<u32>,

    /// Remote work possible.
    #[serde(default)]
    pub remote_possible: bool,

    // Metadata
    /// Hiring company.
    pub company: String,

    /// Application contact.
    pub contact_info: String,

    /// Additional tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────
// Training Program
// ─────────────────────────────────────────────────────────────────

/// A training program in the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingProgram {
    /// Unique program identifier.
    pub id: String,

    /// Program title.
    pub title: String,

    /// Program description.
    pub description: String,

    /// Training provider.
    pub provider: String,

    /// Related green job category.
    pub category: JobCategory,

    // Program details
    /// Duration in hours.
    pub duration_hours: u32,

    /// Difficulty level 1-5.
    pub difficulty_level: u8,

    /// Cost in BRL.
    #[serde(default)]
    pub cost_brl: u32,

    /// Whether the program is free.
    #[serde(default)]
    pub is_free: bool,

    // Requirements
    /// Prerequisites.
    #[serde(default)]
    pub prerequisites: Vec<String>,

    /// Minimum education required.
    pub min_education: EducationLevel,

    // Access
    /// Available online.
    #[serde(default = "default_true")]
    pub online_available: bool,

    /// In-person location state.
    #[serde(default)]
    pub location_state: Option<BrazilState>,

    /// In-person location city.
    #[serde(default)]
    pub location_city: Option<String>,

    // Outcomes
    /// Skills gained from the program.
    #[serde(default)]
    pub skills_gained: Vec<String>,

    /// Certification awarded, if any.
    #[serde(default)]
    pub certification: Option<String>,

    /// Contact information.
    pub contact_info: String,
}

fn default_true() -> bool {
    true
}
