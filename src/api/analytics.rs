//! Analytics routes over the event log and persona store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::Error;
use crate::store::{AnalyticsSummary, PersonaFilter};

use super::error::ApiResult;
use super::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(summary))
        .route("/persona/:persona_id", get(persona_analytics))
        .route("/events", get(events))
        .route("/trends", get(trends))
        .route("/health", get(analytics_health))
}

#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 {
    7
}

#[derive(Debug, Deserialize)]
pub struct EventParams {
    #[serde(default = "default_event_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
    event_type: Option<String>,
    persona_id: Option<Uuid>,
}

fn default_event_limit() -> usize {
    100
}

/// Category popularity across stored personas.
#[derive(Debug, Serialize)]
struct CategoryCount {
    category: String,
    count: usize,
}

/// Event-log summary enriched with persona-store breakdowns.
#[derive(Debug, Serialize)]
struct AnalyticsOverview {
    #[serde(flatten)]
    summary: AnalyticsSummary,
    total_personas: usize,
    popular_categories: Vec<CategoryCount>,
    readiness_distribution: HashMap<String, usize>,
}

async fn summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Json<AnalyticsOverview>> {
    let days = params.days.clamp(1, 90);
    let summary = state.events.summary(days);

    let personas = state.personas.list(&PersonaFilter::default(), 1000, 0);
    let mut category_counts: HashMap<&'static str, usize> = HashMap::new();
    let mut readiness_distribution: HashMap<String, usize> = HashMap::new();
    for persona in &personas {
        for interest in &persona.profile.green_interests {
            *category_counts.entry(interest.slug()).or_insert(0) += 1;
        }
        *readiness_distribution
            .entry(persona.profile.readiness_level.slug().to_string())
            .or_insert(0) += 1;
    }

    let mut popular_categories: Vec<CategoryCount> = category_counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    popular_categories.sort_by(|a, b| b.count.cmp(&a.count));
    popular_categories.truncate(10);

    Ok(Json(AnalyticsOverview {
        summary,
        total_personas: state.personas.count(),
        popular_categories,
        readiness_distribution,
    }))
}

async fn persona_analytics(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let persona = state
        .personas
        .get(persona_id)
        .ok_or_else(|| Error::persona_not_found(persona_id.to_string()))?;

    let interactions = state.events.persona_interactions(persona_id);
    let total = interactions.len();
    let successes = interactions.iter().filter(|i| i.success).count();

    let mut task_breakdown: HashMap<&'static str, usize> = HashMap::new();
    let mut agent_usage: HashMap<String, usize> = HashMap::new();
    let mut duration_total: u64 = 0;
    for interaction in &interactions {
        *task_breakdown.entry(interaction.task_type.slug()).or_insert(0) += 1;
        *agent_usage.entry(interaction.agent_used.clone()).or_insert(0) += 1;
        duration_total += interaction.duration_ms;
    }

    let profile = &persona.profile;
    Ok(Json(json!({
        "persona_id": persona_id,
        "persona_name": profile.name,
        "total_interactions": total,
        "success_rate": if total > 0 { successes as f64 / total as f64 } else { 0.0 },
        "avg_duration_ms": if total > 0 { duration_total as f64 / total as f64 } else { 0.0 },
        "task_breakdown": task_breakdown,
        "agent_usage": agent_usage,
        "recent_interactions": interactions.iter().take(10).collect::<Vec<_>>(),
        "persona_profile": {
            "age": profile.age,
            "location": format!("{}, {}", profile.location_city, profile.location_state.uf()),
            "readiness_level": profile.readiness_level,
            "green_interests": profile.green_interests,
            "preferred_language": profile.preferred_language,
        },
    })))
}

async fn events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventParams>,
) -> Json<Value> {
    let limit = params.limit.min(500);
    let (events, total) = state.events.list(
        limit,
        params.offset,
        params.event_type.as_deref(),
        params.persona_id,
    );

    let returned = events.len();
    Json(json!({
        "events": events,
        "total_returned": returned,
        "total_matched": total,
        "limit": limit,
        "offset": params.offset,
        "filters": {
            "event_type": params.event_type,
            "persona_id": params.persona_id,
        },
    }))
}

async fn trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> Json<Value> {
    let days = params.days.clamp(1, 90);
    let daily = state.events.daily_trends(days);

    let total_interactions: usize = daily.iter().map(|d| d.interactions).sum();
    let avg_daily = if daily.is_empty() {
        0.0
    } else {
        total_interactions as f64 / daily.len() as f64
    };
    let peak_day = daily.iter().max_by_key(|d| d.interactions);

    Json(json!({
        "period_days": days,
        "daily_trends": daily,
        "summary": {
            "total_days": daily.len(),
            "avg_daily_interactions": avg_daily,
            "peak_day": peak_day,
        },
    }))
}

async fn analytics_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let last_day = state.events.summary(1);
    Json(json!({
        "status": "healthy",
        "total_personas": state.personas.count(),
        "events_last_24h": last_day.total_interactions,
        "telemetry_enabled": state.events.is_enabled(),
        "timestamp": Utc::now(),
    }))
}
