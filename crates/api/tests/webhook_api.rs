//! Integration tests for the identity-provider webhook: signature
//! acceptance/rejection and event mirroring semantics.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use timewheel_core::webhook::{decode_secret, sign};

fn secret_key() -> Vec<u8> {
    decode_secret(common::TEST_WEBHOOK_SECRET).expect("test secret decodes")
}

/// Send a signed webhook delivery, optionally corrupting the signature.
async fn deliver(app: Router, body: &str, timestamp: i64, signature: &str) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/webhooks/identity")
        .header("content-type", "application/json")
        .header("webhook-id", "msg_test")
        .header("webhook-timestamp", timestamp.to_string())
        .header("webhook-signature", signature)
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}

fn signed_header(body: &str, timestamp: i64) -> String {
    format!("v1,{}", sign(&secret_key(), "msg_test", timestamp, body))
}

async fn user_row(pool: &PgPool, external_id: &str) -> Option<(String, bool)> {
    sqlx::query_as("SELECT email, is_active FROM users WHERE external_auth_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_event_mirrors_profile(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = r#"{"type":"user.created","data":{"id":"ext_w1","email":"w1@example.com","full_name":"Wanda One"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, body, ts, &signed_header(body, ts)).await;
    assert_eq!(status, StatusCode::OK);

    let (email, is_active) = user_row(&pool, "ext_w1").await.expect("user mirrored");
    assert_eq!(email, "w1@example.com");
    assert!(is_active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn updated_event_refreshes_email(pool: PgPool) {
    sqlx::query(
        "INSERT INTO users (external_auth_id, email, full_name)
         VALUES ('ext_w2', 'old@example.com', 'Old Name')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = r#"{"type":"user.updated","data":{"id":"ext_w2","email":"new@example.com","full_name":"New Name"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, body, ts, &signed_header(body, ts)).await;
    assert_eq!(status, StatusCode::OK);

    let (email, _) = user_row(&pool, "ext_w2").await.unwrap();
    assert_eq!(email, "new@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_event_soft_deactivates(pool: PgPool) {
    sqlx::query(
        "INSERT INTO users (external_auth_id, email) VALUES ('ext_w3', 'w3@example.com')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = r#"{"type":"user.deleted","data":{"id":"ext_w3"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, body, ts, &signed_header(body, ts)).await;
    assert_eq!(status, StatusCode::OK);

    // Row stays, only the flag flips.
    let (email, is_active) = user_row(&pool, "ext_w3").await.expect("row kept");
    assert_eq!(email, "w3@example.com");
    assert!(!is_active);
}

/// Two provider subjects claiming the same email cannot both be mirrored;
/// the second delivery is rejected as a conflict and leaves no row behind.
#[sqlx::test(migrations = "../../db/migrations")]
async fn conflicting_email_across_subjects_is_rejected(pool: PgPool) {
    sqlx::query(
        "INSERT INTO users (external_auth_id, email) VALUES ('ext_w6', 'shared@example.com')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let body = r#"{"type":"user.created","data":{"id":"ext_w7","email":"shared@example.com"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, body, ts, &signed_header(body, ts)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert!(user_row(&pool, "ext_w7").await.is_none());
    let (email, _) = user_row(&pool, "ext_w6").await.unwrap();
    assert_eq!(email, "shared@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_event_is_acknowledged(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = r#"{"type":"session.created","data":{"id":"ext_x"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, body, ts, &signed_header(body, ts)).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bad_signature_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = r#"{"type":"user.created","data":{"id":"ext_w4","email":"w4@example.com"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, body, ts, "v1,AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(user_row(&pool, "ext_w4").await.is_none(), "no mirror on bad signature");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tampered_body_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let signed_body = r#"{"type":"user.deleted","data":{"id":"ext_a"}}"#;
    let sent_body = r#"{"type":"user.deleted","data":{"id":"ext_b"}}"#;
    let ts = chrono::Utc::now().timestamp();

    let status = deliver(app, sent_body, ts, &signed_header(signed_body, ts)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_timestamp_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = r#"{"type":"user.created","data":{"id":"ext_w5","email":"w5@example.com"}}"#;
    let ts = chrono::Utc::now().timestamp() - 3600;

    let status = deliver(app, body, ts, &signed_header(body, ts)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_headers_are_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/webhooks/identity")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"type":"user.created","data":{"id":"x"}}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
