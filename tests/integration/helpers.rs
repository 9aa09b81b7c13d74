//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use spellbook_api::AppState;
use spellbook_auth::SigningSecret;
use spellbook_auth::store::MemoryStore;
use spellbook_core::config::{AppConfig, HashingConfig};

/// Signing secret used by every test app.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: MemoryStore,
    /// Application state
    pub state: AppState,
}

/// Parsed response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_SECRET.to_string();
        config.auth.hashing = HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            salt_length: 16,
            key_length: 32,
        };

        let store = MemoryStore::new();
        let state = AppState::new(config, Arc::new(store.clone()), Arc::new(store.clone()))
            .expect("Failed to build app state");
        let router = spellbook_api::build_router(state.clone());

        Self {
            router,
            store,
            state,
        }
    }

    /// The signing secret the app validates with
    pub fn secret(&self) -> SigningSecret {
        SigningSecret::from(TEST_SECRET)
    }

    /// Register a regular account through the API
    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/users",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Log in through the API and return the response body's `data`
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.body["data"].clone()
    }

    /// Make a request with an optional bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let authorization = token.map(|t| format!("Bearer {}", t));
        self.request_with_authorization(method, path, body, authorization.as_deref())
            .await
    }

    /// Make a request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
