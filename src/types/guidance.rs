//! Assistant request and reply types.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::persona::{Language, PersonaDraft};

// ─────────────────────────────────────────────────────────────────
// Task Kind
// ─────────────────────────────────────────────────────────────────

/// The kinds of guidance the assistant can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// General green career awareness.
    Awareness,
    /// Specific job exploration.
    CareerExploration,
    /// Skills gap analysis.
    SkillAssessment,
    /// Training recommendations.
    LearningGuidance,
    /// Step-by-step pathway guidance.
    PathwayPlanning,
}

impl TaskKind {
    /// Slug used on the wire and in the event log.
    pub fn slug(&self) -> &'static str {
        match self {
            TaskKind::Awareness => "awareness",
            TaskKind::CareerExploration => "career_exploration",
            TaskKind::SkillAssessment => "skill_assessment",
            TaskKind::LearningGuidance => "learning_guidance",
            TaskKind::PathwayPlanning => "pathway_planning",
        }
    }

    /// All task kinds.
    pub fn all() -> &'static [TaskKind] {
        &[
            TaskKind::Awareness,
            TaskKind::CareerExploration,
            TaskKind::SkillAssessment,
            TaskKind::LearningGuidance,
            TaskKind::PathwayPlanning,
        ]
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TaskKind::all()
            .iter()
            .find(|k| k.slug() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown task kind '{}'", s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Request / Reply
// ─────────────────────────────────────────────────────────────────

/// A chat request to the assistant.
///
/// Callers may reference a stored persona by id, embed a one-off profile,
/// or send neither, in which case an anonymous persona is used. When
/// `task_type` is absent the router agent classifies the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceRequest {
    /// Existing persona ID.
    #[serde(default)]
    pub persona_id: Option<Uuid>,

    /// Inline persona profile for one-off requests.
    #[serde(default)]
    pub persona_data: Option<PersonaDraft>,

    /// Requested task kind. None lets the router decide.
    #[serde(default)]
    pub task_type: Option<TaskKind>,

    /// User message.
    pub message: String,

    /// Reply language. None falls back to the persona's preference.
    #[serde(default)]
    pub language: Option<Language>,

    /// Additional free-form context.
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
}

/// The assistant's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceReply {
    /// Assistant response message.
    pub response: String,

    /// Structured recommendations attached to the reply.
    #[serde(default)]
    pub recommendations: Vec<serde_json::Value>,

    /// Suggested next actions.
    #[serde(default)]
    pub next_steps: Vec<String>,

    /// Persona ID used for the reply.
    pub persona_id: Uuid,

    /// Agent that handled the request.
    pub agent_used: String,

    /// Task kind the request resolved to.
    pub task_type: TaskKind,

    /// Reply language.
    pub language: Language,

    /// Confidence in the recommendations, 0.0-1.0.
    pub confidence_score: f64,

    /// Short explanation of how the reply was produced.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_kind_serde() {
        assert_eq!(
            serde_json::to_string(&TaskKind::PathwayPlanning).unwrap(),
            "\"pathway_planning\""
        );
        let kind: TaskKind = serde_json::from_str("\"awareness\"").unwrap();
        assert_eq!(kind, TaskKind::Awareness);
    }

    #[test]
    fn test_task_kind_from_str() {
        assert_eq!(
            "learning_guidance".parse::<TaskKind>().unwrap(),
            TaskKind::LearningGuidance
        );
        assert!("gardening".parse::<TaskKind>().is_err());
    }

    #[test]
    fn test_request_minimal_json() {
        let req: GuidanceRequest =
            serde_json::from_str(r#"{"message": "Quero trabalhar com energia solar"}"#).unwrap();
        assert!(req.persona_id.is_none());
        assert!(req.persona_data.is_none());
        assert!(req.task_type.is_none());
        assert!(req.language.is_none());
        assert!(req.context.is_empty());
    }
}
