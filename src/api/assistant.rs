//! Assistant routes: multi-agent chat orchestration.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::Error;
use crate::types::{GuidanceReply, GuidanceRequest, Persona, PersonaDraft, TaskKind};

use super::error::ApiResult;
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(process_request))
        .route("/chat", post(chat))
        .route("/health", get(assistant_health))
}

/// Run one request through the agent pipeline.
async fn process_request(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GuidanceRequest>,
) -> ApiResult<Json<GuidanceReply>> {
    if request.message.trim().is_empty() {
        return Err(Error::request_invalid("Message must not be empty").into());
    }

    let persona = get_or_create_persona(&state, &request)?;
    let start = Instant::now();

    let outcome = state.orchestrator.handle(&request, &persona).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(reply) => {
            state.record_interaction_event(
                persona.id,
                reply.task_type,
                &reply.agent_used,
                reply.language,
                true,
                duration_ms,
            );
            if let Err(e) = state.personas.record_interaction(persona.id) {
                warn!(error = %e.format_for_log(), "Could not bump interaction counters");
            }

            info!(persona_id = %persona.id, duration_ms, "Assistant request processed");
            Ok(Json(reply))
        }
        Err(e) => {
            state.record_interaction_event(
                persona.id,
                request.task_type.unwrap_or(TaskKind::Awareness),
                "none",
                request.language.unwrap_or(persona.profile.preferred_language),
                false,
                duration_ms,
            );
            Err(e.into())
        }
    }
}

/// Conversational alias: defaults the task to awareness.
async fn chat(
    state: State<Arc<AppState>>,
    Json(mut request): Json<GuidanceRequest>,
) -> ApiResult<Json<GuidanceReply>> {
    if request.task_type.is_none() {
        request.task_type = Some(TaskKind::Awareness);
    }
    process_request(state, Json(request)).await
}

async fn assistant_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let provider = state.orchestrator.provider().health().await;

    Json(json!({
        "status": if provider.operational { "healthy" } else { "unhealthy" },
        "agents": {
            "router_agent": "available",
            "career_agent": "available",
            "learning_agent": "available",
            "guidance_agent": "available",
            "safety_agent": "available",
        },
        "provider": provider,
        "persona_count": state.personas.count(),
        "mock_mode": state.orchestrator.provider().is_mock(),
        "timestamp": Utc::now(),
    }))
}

/// Resolve the persona for a request: existing id, inline profile, or a
/// fresh anonymous profile.
fn get_or_create_persona(state: &AppState, request: &GuidanceRequest) -> Result<Persona, Error> {
    if let Some(id) = request.persona_id {
        if let Some(persona) = state.personas.get(id) {
            return Ok(persona);
        }
        warn!(persona_id = %id, "Persona not found, creating a new one");
    }

    let mut draft = request.persona_data.clone().unwrap_or_else(|| {
        let mut anon = PersonaDraft::anonymous();
        anon.preferred_language = state.config.guidance.language();
        anon
    });
    if let Some(language) = request.language {
        draft.preferred_language = language;
    }
    state.personas.create(draft)
}
