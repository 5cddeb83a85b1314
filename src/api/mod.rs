//! HTTP API surface.
//!
//! One axum router per concern, nested under /v1, sharing an [`AppState`]
//! that owns the orchestrator, persona store, event log, and recommender.

mod analytics;
mod assistant;
mod error;
mod learning;
mod personas;
mod recommendations;

pub use error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;
use uuid::Uuid;

use crate::agents::Orchestrator;
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::provider::ProviderService;
use crate::recommend::Recommender;
use crate::store::{ensure_data_dir, Catalog, EventLog, PersonaStore};
use crate::types::{InteractionEvent, Language, TaskKind};
use crate::version::BuildInfo;

/// Shared state behind every handler.
pub struct AppState {
    pub config: ServiceConfig,
    pub orchestrator: Orchestrator,
    pub personas: PersonaStore,
    pub events: EventLog,
    pub recommender: Recommender,
}

impl AppState {
    /// Wire up all services from configuration.
    pub fn new(config: ServiceConfig) -> Result<Arc<Self>> {
        ensure_data_dir(&config.data_dir())?;

        let provider = Arc::new(ProviderService::new(&config.provider));
        let orchestrator = Orchestrator::new(provider)?;
        let personas = PersonaStore::open(config.personas_path())?;
        let events = EventLog::open(config.events_path(), &config.telemetry)?;
        let recommender = Recommender::new(Catalog::builtin(), config.guidance.clone());

        Ok(Arc::new(Self {
            config,
            orchestrator,
            personas,
            events,
            recommender,
        }))
    }

    /// Record an assistant interaction outcome.
    pub(crate) fn record_interaction_event(
        &self,
        persona_id: Uuid,
        task: TaskKind,
        agent: &str,
        language: Language,
        success: bool,
        duration_ms: u64,
    ) {
        let event = InteractionEvent::new(
            persona_id,
            "interaction",
            task,
            agent,
            language,
            success,
            duration_ms,
        );
        if let Err(e) = self.events.record(event) {
            warn!(error = %e.format_for_log(), "Could not record interaction event");
        }
    }

    /// Record a persona lifecycle event (created, updated, deleted).
    pub(crate) fn record_api_event(
        &self,
        persona_id: Uuid,
        event_type: &str,
        task: TaskKind,
        success: bool,
    ) {
        let event = InteractionEvent::new(
            persona_id,
            event_type,
            task,
            "api",
            Language::default(),
            success,
            0,
        );
        if let Err(e) = self.events.record(event) {
            warn!(error = %e.format_for_log(), "Could not record API event");
        }
    }

    /// Record recommendation feedback.
    pub(crate) fn record_feedback_event(
        &self,
        persona_id: Uuid,
        recommendation_id: &str,
        feedback_type: &str,
        rating: Option<u8>,
    ) {
        let mut event = InteractionEvent::new(
            persona_id,
            "feedback",
            TaskKind::Awareness,
            "api",
            Language::default(),
            true,
            0,
        );
        event.user_feedback = rating;
        event
            .metadata
            .insert("recommendation_id".to_string(), json!(recommendation_id));
        event
            .metadata
            .insert("feedback_type".to_string(), json!(feedback_type));
        if let Err(e) = self.events.record(event) {
            warn!(error = %e.format_for_log(), "Could not record feedback event");
        }
    }
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .nest("/v1/personas", personas::router())
        .nest("/v1/assistant", assistant::router())
        .nest("/v1/analytics", analytics::router())
        .nest("/v1/learning", learning::router())
        .nest("/v1/recommendations", recommendations::router())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn service_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let build = BuildInfo::current();
    Json(json!({
        "name": "trilha-verde",
        "version": build.version,
        "description": "Green career guidance for Brazilian youth",
        "status": "active",
        "mock_mode": state.orchestrator.provider().is_mock(),
        "endpoints": {
            "personas": "/v1/personas",
            "assistant": "/v1/assistant",
            "analytics": "/v1/analytics",
            "learning": "/v1/learning",
            "recommendations": "/v1/recommendations",
            "health": "/health",
        },
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "mock_mode": state.orchestrator.provider().is_mock(),
        "services": {
            "api": "operational",
            "agents": "operational",
            "storage": "operational",
            "analytics": "operational",
        },
    }))
}
