//! Interaction events recorded for the analytics dashboard.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::guidance::TaskKind;
use crate::types::persona::Language;

/// One assistant interaction, appended to the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Unique event ID.
    pub id: Uuid,

    /// Event timestamp (UTC).
    pub timestamp: DateTime<Utc>,

    /// Associated persona ID.
    pub persona_id: Uuid,

    /// Event type label (e.g. "chat", "recommendation_feedback").
    pub event_type: String,

    /// Task kind handled.
    pub task_type: TaskKind,

    /// Agent that handled the interaction.
    pub agent_used: String,

    /// Reply language.
    pub language: Language,

    /// Whether the interaction succeeded.
    pub success: bool,

    /// Interaction duration in milliseconds.
    pub duration_ms: u64,

    /// Optional user feedback score, 1-5.
    #[serde(default)]
    pub user_feedback: Option<u8>,

    /// Additional event metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl InteractionEvent {
    /// Build a new event stamped with the current time.
    pub fn new(
        persona_id: Uuid,
        event_type: impl Into<String>,
        task_type: TaskKind,
        agent_used: impl Into<String>,
        language: Language,
        success: bool,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            persona_id,
            event_type: event_type.into(),
            task_type,
            agent_used: agent_used.into(),
            language,
            success,
            duration_ms,
            user_feedback: None,
            metadata: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_roundtrip() {
        let event = InteractionEvent::new(
            Uuid::new_v4(),
            "chat",
            TaskKind::Awareness,
            "awareness_agent",
            Language::PtBr,
            true,
            420,
        );

        let json = serde_json::to_string(&event).unwrap();
        let parsed: InteractionEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.task_type, TaskKind::Awareness);
        assert_eq!(parsed.language, Language::PtBr);
        assert!(parsed.user_feedback.is_none());
    }
}
