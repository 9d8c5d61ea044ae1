use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::{Map, Value, json};
use tower::util::ServiceExt;

use sage_api::{routes, state::AppState};
use sage_config::{Config, LlmProviderConfig};
use sage_service::{BoxFuture, GenerationProvider, Providers, SageService};
use sage_storage::db::Db;
use sage_testkit::TestDatabase;

fn test_config(dsn: String) -> Config {
	Config {
		service: sage_config::Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: sage_config::Storage {
			sqlite: sage_config::Sqlite { dsn, pool_max_conns: 1 },
		},
		providers: sage_config::Providers {
			llm: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/".to_string(),
				model: "test".to_string(),
				temperature: 0.6,
				max_tokens: 600,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
	}
}

struct FixedGenerator {
	value: Value,
}
impl GenerationProvider for FixedGenerator {
	fn generate<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<Value>> {
		let value = self.value.clone();

		Box::pin(async move { Ok(value) })
	}
}

async fn test_state(test_db: &TestDatabase, value: Value) -> AppState {
	let config = test_config(test_db.dsn().to_string());
	let db = Db::connect(&config.storage.sqlite).await.expect("Failed to connect to database.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let providers = Providers::new(Arc::new(FixedGenerator { value }));
	let service = SageService::with_providers(config, db, providers);

	AppState { service: Arc::new(service) }
}

async fn read_json(response: axum::response::Response) -> Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response body.")
}

#[tokio::test]
async fn health_ok() {
	let test_db = TestDatabase::new().expect("Failed to create test database.");
	let state = test_state(&test_db, json!("unused")).await;
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().expect("Failed to cleanup test database.");
}

#[tokio::test]
async fn chat_turn_returns_reply_and_memory() {
	let test_db = TestDatabase::new().expect("Failed to create test database.");
	let engine_value = json!({ "response": {
		"reply": "Here is your plan.",
		"memory_update": { "plan": { "Day 1": ["read ch.1"] } },
	} });
	let state = test_state(&test_db, engine_value).await;
	let app = routes::router(state);
	let payload = json!({ "session_key": "s1", "message": "plan my day" });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/chat")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/chat.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["reply"], "Here is your plan.");
	assert_eq!(body["memory"]["plan"]["Day 1"][0], "read ch.1");
	assert!(body["memory"].get("chat").is_none());

	test_db.cleanup().expect("Failed to cleanup test database.");
}

#[tokio::test]
async fn blank_message_is_a_bad_request() {
	let test_db = TestDatabase::new().expect("Failed to create test database.");
	let state = test_state(&test_db, json!("unused")).await;
	let app = routes::router(state);
	let payload = json!({ "session_key": "s1", "message": "   " });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/chat")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/chat.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = read_json(response).await;

	assert_eq!(body["error_code"], "invalid_request");
	assert!(body["message"].as_str().expect("Expected a message.").contains("message"));

	test_db.cleanup().expect("Failed to cleanup test database.");
}

#[tokio::test]
async fn memory_endpoint_returns_snapshot() {
	let test_db = TestDatabase::new().expect("Failed to create test database.");
	let engine_value = json!({ "response": {
		"reply": "Saved.",
		"memory_update": { "goals": ["ace midterm"] },
	} });
	let state = test_state(&test_db, engine_value).await;
	let app = routes::router(state.clone());
	let payload = json!({ "session_key": "s1", "message": "remember my goal" });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/chat")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/chat.");

	assert_eq!(response.status(), StatusCode::OK);

	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/sessions/s1/memory")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call memory endpoint.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["goals"][0], "ace midterm");

	test_db.cleanup().expect("Failed to cleanup test database.");
}

#[tokio::test]
async fn raw_text_reply_passes_through_verbatim() {
	let test_db = TestDatabase::new().expect("Failed to create test database.");
	let state =
		test_state(&test_db, json!("Sorry, I cannot help with that {invalid json")).await;
	let app = routes::router(state);
	let payload = json!({ "session_key": "s1", "message": "hello" });
	let response = app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/chat")
				.header("content-type", "application/json")
				.body(Body::from(payload.to_string()))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /v1/chat.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = read_json(response).await;

	assert_eq!(body["reply"], "Sorry, I cannot help with that {invalid json");
	assert_eq!(body["memory"]["goals"], json!([]));

	test_db.cleanup().expect("Failed to cleanup test database.");
}
