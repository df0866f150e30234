//! Identity-provider webhook handler.
//!
//! The provider owns user lifecycle; this endpoint mirrors its events into
//! the local `users` table. Deliveries are Svix-signed; the raw body must
//! be verified byte-for-byte before parsing, so the handler takes `String`
//! rather than `Json<...>`.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use timewheel_core::error::CoreError;
use timewheel_core::webhook;
use timewheel_db::models::user::{UpdateUser, UpsertUser};
use timewheel_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Envelope of an identity event delivery.
#[derive(Debug, Deserialize)]
struct IdentityEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: IdentityEventData,
}

/// Profile payload carried by identity events.
#[derive(Debug, Deserialize)]
struct IdentityEventData {
    id: String,
    email: Option<String>,
    full_name: Option<String>,
}

/// POST /api/v1/webhooks/identity
///
/// Verifies the delivery signature, then mirrors the event:
/// - `user.created` / `user.updated` -> upsert the profile
/// - `user.deleted` -> soft-deactivate
/// - anything else -> acknowledged and ignored
pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<impl IntoResponse> {
    let message_id = required_header(&headers, "webhook-id")?;
    let timestamp: i64 = required_header(&headers, "webhook-timestamp")?
        .parse()
        .map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Malformed webhook timestamp".into()))
        })?;
    let signature = required_header(&headers, "webhook-signature")?;

    let key = webhook::decode_secret(&state.config.identity.webhook_secret)?;
    webhook::verify(
        &key,
        &message_id,
        timestamp,
        &signature,
        &body,
        chrono::Utc::now(),
    )?;

    let event: IdentityEvent = serde_json::from_str(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed event payload: {e}")))?;

    match event.event_type.as_str() {
        "user.created" | "user.updated" => {
            let email = event.data.email.ok_or_else(|| {
                AppError::BadRequest("Identity event is missing an email".into())
            })?;
            match UserRepo::find_by_external_id(&state.pool, &event.data.id).await? {
                Some(existing) => {
                    UserRepo::update(
                        &state.pool,
                        existing.id,
                        &UpdateUser {
                            email: Some(email),
                            full_name: event.data.full_name,
                            role: None,
                            onboarded: None,
                            is_active: None,
                        },
                    )
                    .await?;
                    tracing::info!(
                        external_id = %event.data.id,
                        event = %event.event_type,
                        "Mirrored identity event onto existing profile"
                    );
                }
                None => {
                    let user = UserRepo::upsert_from_identity(
                        &state.pool,
                        &UpsertUser {
                            external_auth_id: event.data.id.clone(),
                            email,
                            full_name: event.data.full_name,
                        },
                    )
                    .await?;
                    tracing::info!(
                        user_id = user.id,
                        external_id = %event.data.id,
                        event = %event.event_type,
                        "Mirrored identity event into new profile"
                    );
                }
            }
        }
        "user.deleted" => {
            let deactivated =
                UserRepo::deactivate_by_external_id(&state.pool, &event.data.id).await?;
            tracing::info!(
                external_id = %event.data.id,
                deactivated,
                "Processed user.deleted event"
            );
        }
        other => {
            tracing::debug!(event = %other, "Ignoring unhandled identity event type");
        }
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "received": true }),
    }))
}

/// Read a required webhook header; absence means the delivery cannot be
/// authenticated.
fn required_header(headers: &HeaderMap, name: &str) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Missing {name} header"
            )))
        })
}
