//! Persona CRUD routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::Error;
use crate::store::PersonaFilter;
use crate::types::{BrazilState, Persona, PersonaDraft, PersonaUpdate, ReadinessLevel, TaskKind};

use super::error::ApiResult;
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_personas).post(create_persona))
        .route(
            "/:persona_id",
            get(get_persona).put(update_persona).delete(delete_persona),
        )
        .route("/:persona_id/interactions", get(persona_interactions))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
    state: Option<String>,
    readiness_level: Option<String>,
    search: Option<String>,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
struct DeleteResponse {
    success: bool,
    message: String,
}

async fn list_personas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Persona>>> {
    let filter = PersonaFilter {
        location_state: parse_filter::<BrazilState>(params.state.as_deref(), "state")?,
        readiness_level: parse_filter::<ReadinessLevel>(
            params.readiness_level.as_deref(),
            "readiness_level",
        )?,
        query: params.search.filter(|q| !q.trim().is_empty()),
        ..Default::default()
    };

    let personas = state
        .personas
        .list(&filter, params.limit.min(100), params.offset);
    Ok(Json(personas))
}

async fn get_persona(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
) -> ApiResult<Json<Persona>> {
    let persona = state
        .personas
        .get(persona_id)
        .ok_or_else(|| Error::persona_not_found(persona_id.to_string()))?;
    Ok(Json(persona))
}

async fn create_persona(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<PersonaDraft>,
) -> ApiResult<(StatusCode, Json<Persona>)> {
    let persona = state.personas.create(draft)?;
    state.record_api_event(persona.id, "persona_created", TaskKind::Awareness, true);
    info!(persona_id = %persona.id, name = %persona.profile.name, "Persona created");
    Ok((StatusCode::CREATED, Json(persona)))
}

async fn update_persona(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
    Json(update): Json<PersonaUpdate>,
) -> ApiResult<Json<Persona>> {
    let persona = state.personas.update(persona_id, update)?;
    state.record_api_event(persona_id, "persona_updated", TaskKind::Awareness, true);
    Ok(Json(persona))
}

async fn delete_persona(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
) -> ApiResult<Json<DeleteResponse>> {
    if !state.personas.delete(persona_id)? {
        return Err(Error::persona_not_found(persona_id.to_string()).into());
    }
    state.record_api_event(persona_id, "persona_deleted", TaskKind::Awareness, true);
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Persona {} deleted successfully", persona_id),
    }))
}

async fn persona_interactions(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    if state.personas.get(persona_id).is_none() {
        return Err(Error::persona_not_found(persona_id.to_string()).into());
    }

    let interactions = state.events.persona_interactions(persona_id);
    Ok(Json(json!({
        "persona_id": persona_id,
        "interaction_count": interactions.len(),
        "interactions": interactions,
    })))
}

fn parse_filter<T>(value: Option<&str>, field: &str) -> Result<Option<T>, Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
            Error::request_invalid(format!("Invalid {} filter '{}': {}", field, raw, e))
        }),
    }
}
