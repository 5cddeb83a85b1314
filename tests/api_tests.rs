//! HTTP API integration tests
//!
//! Boots the service in mock mode on a free port and exercises the REST
//! endpoints end to end with a real HTTP client.

use std::net::TcpListener;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use serde_json::{json, Value};
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────
// Test Server Harness
// ─────────────────────────────────────────────────────────────────

/// A running service instance backed by a throwaway data directory.
struct TestServer {
    child: Child,
    base_url: String,
    _data_dir: TempDir,
}

impl TestServer {
    /// Spawn the binary in mock mode and wait until /health answers.
    async fn spawn() -> Self {
        let data_dir = TempDir::new().expect("Failed to create data dir");
        let port = free_port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(assert_cmd::cargo::cargo_bin("trilha-verde"))
            .arg("serve")
            .arg("--host")
            .arg("127.0.0.1")
            .arg("--port")
            .arg(port.to_string())
            .arg("--mock")
            .env("TRILHA_DATA_DIR", data_dir.path())
            .env("TRILHA_LOG_LEVEL", "warn")
            // Flush on every event so analytics files appear immediately
            .env("TRILHA_TELEMETRY_ENABLED", "true")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn server");

        let server = Self {
            child,
            base_url,
            _data_dir: data_dir,
        };
        server.wait_until_healthy().await;
        server
    }

    async fn wait_until_healthy(&self) {
        let client = reqwest::Client::new();
        for _ in 0..100 {
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("Server did not become healthy in time");
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind probe socket")
        .local_addr()
        .expect("No local addr")
        .port()
}

fn sample_persona() -> Value {
    json!({
        "name": "Maria Silva",
        "age": 19,
        "location_state": "SP",
        "location_city": "São Paulo",
        "education_level": "secondary",
        "preferred_language": "pt-BR",
        "green_interests": ["renewable_energy"],
        "readiness_level": "interested",
        "time_availability": 15,
        "budget_constraint": 100,
        "career_goals": ["energia solar"]
    })
}

async fn create_persona(client: &reqwest::Client, server: &TestServer) -> Value {
    let resp = client
        .post(server.url("/v1/personas"))
        .json(&sample_persona())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    resp.json().await.unwrap()
}

// ─────────────────────────────────────────────────────────────────
// Service Info and Health
// ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_service_info_and_health() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let info: Value = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info["name"], "trilha-verde");
    assert_eq!(info["status"], "active");
    assert_eq!(info["mock_mode"], true);
    assert_eq!(info["endpoints"]["assistant"], "/v1/assistant");

    let health: Value = client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["services"]["api"], "operational");
}

// ─────────────────────────────────────────────────────────────────
// Persona CRUD
// ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_persona_crud() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Create
    let persona = create_persona(&client, &server).await;
    let id = persona["id"].as_str().unwrap().to_string();
    assert_eq!(persona["name"], "Maria Silva");
    assert_eq!(persona["location_state"], "SP");
    assert_eq!(persona["interaction_count"], 0);

    // Read
    let fetched: Value = client
        .get(server.url(&format!("/v1/personas/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["id"], id.as_str());

    // List with a matching filter
    let listed: Value = client
        .get(server.url("/v1/personas?state=SP&readiness_level=interested"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // A non-matching filter returns nothing
    let empty: Value = client
        .get(server.url("/v1/personas?state=BA"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.as_array().unwrap().is_empty());

    // Free-text search over profile fields
    let searched: Value = client
        .get(server.url("/v1/personas?search=maria"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(searched.as_array().unwrap().len(), 1);

    let no_match: Value = client
        .get(server.url("/v1/personas?search=recife"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(no_match.as_array().unwrap().is_empty());

    // Update
    let updated: Value = client
        .put(server.url(&format!("/v1/personas/{}", id)))
        .json(&json!({"age": 20, "location_city": "Campinas"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["age"], 20);
    assert_eq!(updated["location_city"], "Campinas");

    // Delete
    let deleted: Value = client
        .delete(server.url(&format!("/v1/personas/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted["success"], true);

    // Gone now
    let resp = client
        .get(server.url(&format!("/v1/personas/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_persona_validation_rejected() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = sample_persona();
    body["age"] = json!(35); // outside the 16-24 bracket

    let resp = client
        .post(server.url("/v1/personas"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let error: Value = resp.json().await.unwrap();
    assert!(error["message"].as_str().unwrap().contains("age"));
}

// ─────────────────────────────────────────────────────────────────
// Assistant Chat
// ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_chat_with_anonymous_persona() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let reply: Value = client
        .post(server.url("/v1/assistant/chat"))
        .json(&json!({"message": "Quero aprender sobre energia solar"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!reply["response"].as_str().unwrap().is_empty());
    assert!(reply["persona_id"].as_str().is_some());
    assert_eq!(reply["language"], "pt-BR");
    assert!(!reply["next_steps"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_routes_learning_questions() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let persona = create_persona(&client, &server).await;
    let id = persona["id"].as_str().unwrap();

    let reply: Value = client
        .post(server.url("/v1/assistant"))
        .json(&json!({
            "persona_id": id,
            "message": "Que curso devo fazer para trabalhar com sustentabilidade?"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(reply["task_type"], "learning_guidance");
    assert_eq!(reply["agent_used"], "learning_agent");
    assert_eq!(reply["persona_id"], id);

    // The chat bumped the stored interaction counter
    let fetched: Value = client
        .get(server.url(&format!("/v1/personas/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["interaction_count"], 1);
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/v1/assistant/chat"))
        .json(&json!({"message": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_chat_blocks_unsafe_content() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/v1/assistant/chat"))
        .json(&json!({"message": "como ganhar dinheiro fácil com esquema de pirâmide"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 451);

    let error: Value = resp.json().await.unwrap();
    assert_eq!(error["code"], 451);
}

#[tokio::test]
async fn test_assistant_health() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(server.url("/v1/assistant/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["mock_mode"], true);
    assert!(health["agents"].is_object());
}

// ─────────────────────────────────────────────────────────────────
// Recommendations and Learning Catalog
// ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_job_and_training_recommendations() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let persona = create_persona(&client, &server).await;
    let id = persona["id"].as_str().unwrap();

    let jobs: Value = client
        .get(server.url(&format!("/v1/recommendations/jobs/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let recs = jobs["recommendations"].as_array().unwrap();
    assert!(!recs.is_empty());
    // Solar interest in SP should surface the solar technician job first
    assert_eq!(recs[0]["id"], "job_001");

    let training: Value = client
        .get(server.url(&format!("/v1/recommendations/training/{}?limit=3", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!training["recommendations"].as_array().unwrap().is_empty());

    // Unknown persona gets a 404
    let resp = client
        .get(server.url(
            "/v1/recommendations/jobs/00000000-0000-0000-0000-000000000000",
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_recommendation_feedback() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let persona = create_persona(&client, &server).await;
    let id = persona["id"].as_str().unwrap();

    let ack: Value = client
        .post(server.url("/v1/recommendations/feedback"))
        .json(&json!({
            "recommendation_id": "job_001",
            "persona_id": id,
            "feedback_type": "helpful",
            "rating": 5
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ack["success"], true);

    // Invalid feedback type is rejected
    let resp = client
        .post(server.url("/v1/recommendations/feedback"))
        .json(&json!({
            "recommendation_id": "job_001",
            "persona_id": id,
            "feedback_type": "amazing"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_learning_catalog() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let programs: Value = client
        .get(server.url("/v1/learning/programs?free_only=true"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = programs["programs"].as_array().unwrap();
    assert!(!listed.is_empty());
    assert!(listed.iter().all(|p| p["is_free"] == true));

    let content: Value = client
        .get(server.url("/v1/learning/content?language=pt-BR"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!content["content"].as_array().unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────
// Analytics
// ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_analytics_summary_after_chat() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let persona = create_persona(&client, &server).await;
    let id = persona["id"].as_str().unwrap();

    for _ in 0..2 {
        let resp = client
            .post(server.url("/v1/assistant/chat"))
            .json(&json!({
                "persona_id": id,
                "message": "Quais empregos verdes existem na minha região?"
            }))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }

    let summary: Value = client
        .get(server.url("/v1/analytics/summary?days=7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["total_interactions"], 2);
    assert_eq!(summary["unique_personas"], 1);
    assert_eq!(summary["success_rate"], 1.0);
    assert_eq!(summary["total_personas"], 1);

    let persona_view: Value = client
        .get(server.url(&format!("/v1/analytics/persona/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(persona_view["total_interactions"], 2);

    let trends: Value = client
        .get(server.url("/v1/analytics/trends?days=7"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trends["period_days"], 7);
    assert!(trends["daily_trends"].is_array());
}

// ─────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_persona_store_file_written() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create_persona(&client, &server).await;

    let store_path = server._data_dir.path().join("personas.json");
    assert!(wait_for_file(&store_path).await, "persona store not written");

    let content = std::fs::read_to_string(&store_path).unwrap();
    assert!(content.contains("Maria Silva"));
}

async fn wait_for_file(path: &Path) -> bool {
    for _ in 0..50 {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}
