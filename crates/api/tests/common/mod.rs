#![allow(dead_code)]

//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router via [`build_app_router`] with stubbed
//! hosted providers (identity, LLM), so tests exercise the full middleware
//! stack without network access.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use timewheel_api::auth::jwt::{self, JwtConfig};
use timewheel_api::clients::identity::{IdentityError, IdentityProfile, IdentityProvider};
use timewheel_api::clients::llm::{LlmError, SummaryModel};
use timewheel_api::config::{IdentityConfig, LlmConfig, ServerConfig};
use timewheel_api::router::build_app_router;
use timewheel_api::state::AppState;
use timewheel_core::types::DbId;

/// Base64 of a fixed 32-byte key; tests sign webhook deliveries with it.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

/// Build a test `ServerConfig` with safe defaults and no env reads.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        identity: IdentityConfig {
            api_base_url: "http://identity.invalid".to_string(),
            secret_key: "sk_test".to_string(),
            webhook_secret: TEST_WEBHOOK_SECRET.to_string(),
        },
        llm: LlmConfig {
            api_base_url: "http://llm.invalid".to_string(),
            api_key: "llm_test".to_string(),
            model: "test-model".to_string(),
        },
        mail: None,
    }
}

/// Identity provider stub: codes registered via [`StubIdentity::with_code`]
/// exchange successfully, everything else is rejected as invalid.
#[derive(Default)]
pub struct StubIdentity {
    profiles: HashMap<String, IdentityProfile>,
}

impl StubIdentity {
    pub fn with_code(mut self, code: &str, external_id: &str, email: &str) -> Self {
        self.profiles.insert(
            code.to_string(),
            IdentityProfile {
                external_id: external_id.to_string(),
                email: email.to_string(),
                full_name: Some("Test User".to_string()),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityError> {
        self.profiles
            .get(code)
            .cloned()
            .ok_or(IdentityError::InvalidCode)
    }
}

/// LLM stub: echoes a fixed completion, or fails when built with
/// [`StubLlm::failing`].
pub struct StubLlm {
    fail: bool,
}

impl StubLlm {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl SummaryModel for StubLlm {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
        if self.fail {
            return Err(LlmError("stubbed provider outage".to_string()));
        }
        Ok(format!("Summary of {} prompt bytes.", prompt.len()))
    }
}

/// Build the full application router with default stubs.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, StubIdentity::default(), StubLlm::ok())
}

/// Build the full application router with explicit provider stubs.
pub fn build_test_app_with(pool: PgPool, identity: StubIdentity, llm: StubLlm) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity: Arc::new(identity),
        llm: Arc::new(llm),
        mailer: None,
    };

    build_app_router(state, &config)
}

/// Mint a valid access token for the given user, matching the test config.
pub fn mint_token(user_id: DbId, role: &str) -> String {
    jwt::generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response status, printing the body on mismatch.
pub async fn assert_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}
