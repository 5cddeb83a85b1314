//! Recommendation routes: scored job and training matches plus feedback.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::Error;

use super::error::ApiResult;
use super::AppState;

const FEEDBACK_TYPES: &[&str] = &["helpful", "not_helpful", "applied", "saved"];

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs/:persona_id", get(job_recommendations))
        .route("/training/:persona_id", get(training_recommendations))
        .route("/feedback", post(submit_feedback))
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    recommendation_id: String,
    persona_id: Uuid,
    feedback_type: String,
    rating: Option<u8>,
}

async fn job_recommendations(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Json<Value>> {
    let persona = state
        .personas
        .get(persona_id)
        .ok_or_else(|| Error::persona_not_found(persona_id.to_string()))?;

    let (recommendations, total) = state.recommender.jobs_for(&persona, params.limit.min(20));
    Ok(Json(json!({
        "persona_id": persona_id,
        "recommendations": recommendations,
        "total_available": total,
        "generated_at": Utc::now(),
    })))
}

async fn training_recommendations(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Json<Value>> {
    let persona = state
        .personas
        .get(persona_id)
        .ok_or_else(|| Error::persona_not_found(persona_id.to_string()))?;

    let (recommendations, total) = state
        .recommender
        .training_for(&persona, params.limit.min(20));
    Ok(Json(json!({
        "persona_id": persona_id,
        "recommendations": recommendations,
        "total_available": total,
        "generated_at": Utc::now(),
    })))
}

async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Json(feedback): Json<FeedbackRequest>,
) -> ApiResult<Json<Value>> {
    if !FEEDBACK_TYPES.contains(&feedback.feedback_type.as_str()) {
        return Err(Error::request_invalid(format!(
            "Invalid feedback_type '{}'. Valid: {}",
            feedback.feedback_type,
            FEEDBACK_TYPES.join(", ")
        ))
        .into());
    }
    if let Some(rating) = feedback.rating {
        if !(1..=5).contains(&rating) {
            return Err(Error::request_invalid("Rating must be between 1 and 5").into());
        }
    }

    state.record_feedback_event(
        feedback.persona_id,
        &feedback.recommendation_id,
        &feedback.feedback_type,
        feedback.rating,
    );
    info!(
        recommendation_id = %feedback.recommendation_id,
        feedback_type = %feedback.feedback_type,
        "Recommendation feedback recorded"
    );

    Ok(Json(json!({
        "success": true,
        "message": "Feedback recorded successfully",
        "feedback": {
            "recommendation_id": feedback.recommendation_id,
            "persona_id": feedback.persona_id,
            "feedback_type": feedback.feedback_type,
            "rating": feedback.rating,
            "timestamp": Utc::now(),
        },
    })))
}
