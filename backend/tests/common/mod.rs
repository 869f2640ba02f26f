//! Common test utilities for integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sessiongate_backend::{
    auth::FixedClock,
    config::AppConfig,
    repositories::{InMemoryUserStore, UserStore},
    routes,
    state::AppState,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    /// Application over an in-memory store and the wall clock
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(Arc::new(InMemoryUserStore::new()), config, None)
    }

    /// Application whose token clock is under test control
    pub fn with_clock(clock: FixedClock) -> Self {
        Self::with_store(Arc::new(InMemoryUserStore::new()), test_config(), Some(clock))
    }

    pub fn with_store(
        store: Arc<dyn UserStore>,
        config: AppConfig,
        clock: Option<FixedClock>,
    ) -> Self {
        let state = match clock {
            Some(clock) => AppState::with_clock(store, config, Arc::new(clock)),
            None => AppState::new(store, config),
        }
        .expect("Failed to build app state");
        let app = routes::create_router(state.clone());
        Self { app, state }
    }

    /// Make a GET request, optionally with an Authorization header
    pub async fn get(&self, path: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a GET request carrying a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> (StatusCode, String) {
        self.get(path, Some(&format!("Bearer {}", token))).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Register a user and return the issued token
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let (status, response) = self.post("/signup", &body.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", response);
        let response: serde_json::Value = serde_json::from_str(&response).unwrap();
        response["token"].as_str().unwrap().to_string()
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.jwt.secret = "test-secret-key-for-testing-only-32chars".to_string();
    config
}
