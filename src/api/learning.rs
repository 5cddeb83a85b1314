//! Learning catalog routes: training programs and awareness content.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Error;
use crate::types::{BrazilState, JobCategory, Language};

use super::error::ApiResult;
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/programs", get(list_programs))
        .route("/content", get(list_content))
}

#[derive(Debug, Deserialize)]
pub struct ProgramParams {
    category: Option<String>,
    #[serde(default)]
    free_only: bool,
    location_state: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct ContentParams {
    topic: Option<String>,
    language: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    20
}

async fn list_programs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProgramParams>,
) -> ApiResult<Json<Value>> {
    let category = parse_opt::<JobCategory>(params.category.as_deref(), "category")?;
    let location_state = parse_opt::<BrazilState>(params.location_state.as_deref(), "location_state")?;

    let programs = state.recommender.catalog().filter_programs(
        category,
        params.free_only,
        location_state,
        params.limit.min(100),
    );

    let total = programs.len();
    Ok(Json(json!({
        "programs": programs,
        "total": total,
        "filters_applied": {
            "category": params.category,
            "free_only": params.free_only,
            "location_state": params.location_state,
        },
    })))
}

async fn list_content(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContentParams>,
) -> ApiResult<Json<Value>> {
    let language = parse_opt::<Language>(params.language.as_deref(), "language")?;

    let content = state.recommender.catalog().filter_content(
        params.topic.as_deref(),
        language,
        params.limit.min(100),
    );

    let total = content.len();
    Ok(Json(json!({
        "content": content,
        "total": total,
        "filters_applied": {
            "topic": params.topic,
            "language": params.language,
        },
    })))
}

fn parse_opt<T>(value: Option<&str>, field: &str) -> Result<Option<T>, Error>
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
