//! Authentication handlers: provider code exchange, session issuance,
//! refresh-token rotation, logout, and the dashboard bootstrap trigger.
//!
//! Invitation reconciliation runs on both sign-in triggers (code exchange
//! and bootstrap). A reconciliation failure is logged and degrades to
//! "no membership applied"; it never fails the sign-in itself.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::{Deserialize, Serialize};
use timewheel_core::error::CoreError;
use timewheel_db::models::member::OrganizationMember;
use timewheel_db::models::reconciliation::ReconciliationOutcome;
use timewheel_db::models::session::CreateSession;
use timewheel_db::models::user::{UpsertUser, User};
use timewheel_db::repositories::{MemberRepo, Reconciler, SessionRepo, UserRepo};

use crate::auth::jwt;
use crate::clients::identity::IdentityError;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the browser OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub redirect_to: Option<String>,
}

/// Body for the SPA code-exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub code: String,
}

/// Body for refresh-token rotation.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair plus profile returned by session issuance.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
    /// Outcome of the invitation-reconciliation run, `null` when the run
    /// itself failed (sign-in still succeeds, degraded).
    pub reconciliation: Option<ReconciliationOutcome>,
}

/// Profile plus memberships returned by the bootstrap trigger.
#[derive(Debug, Serialize)]
pub struct BootstrapResponse {
    pub user: User,
    pub memberships: Vec<OrganizationMember>,
    pub reconciliation: Option<ReconciliationOutcome>,
}

/// GET /api/v1/auth/callback?code=&redirect_to=
///
/// Browser variant of sign-in: exchanges the one-time provider code,
/// mirrors the profile, runs reconciliation, then 303-redirects to the
/// requested page. Tokens are never placed in the redirect URL; the SPA
/// obtains them from `POST /auth/session`.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<impl IntoResponse> {
    let (user, _) = exchange_and_reconcile(&state, &params.code).await?;

    let target = sanitize_redirect(params.redirect_to.as_deref());
    tracing::info!(user_id = user.id, %target, "OAuth callback sign-in");

    Ok(Redirect::to(&target))
}

/// POST /api/v1/auth/session
///
/// SPA variant of sign-in: exchanges the code for a JSON token pair.
/// Same reconciliation side effects as the callback.
pub async fn create_session(
    State(state): State<AppState>,
    Json(input): Json<SessionRequest>,
) -> AppResult<impl IntoResponse> {
    let (user, reconciliation) = exchange_and_reconcile(&state, &input.code).await?;

    let response = issue_tokens(&state, user, reconciliation).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Rotate a refresh token: the presented token's session is revoked and a
/// fresh pair is issued. An unknown, expired, or revoked token gets 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let hash = jwt::hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::find_active_by_hash(&state.pool, &hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid refresh token".into()))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Account is inactive".into())))?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let response = issue_tokens(&state, user, None).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all of the caller's sessions.
pub async fn logout(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/bootstrap
///
/// Dashboard-mount trigger: re-runs invitation reconciliation for the
/// current user and returns the profile plus memberships. Covers the case
/// where an invitation was created after the user already had an account.
pub async fn bootstrap(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let reconciliation = run_reconciliation(&state, user.id, &user.email).await;

    // Re-read: reconciliation may have promoted the role or onboarded flag.
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let memberships = MemberRepo::list_for_user(&state.pool, user.id).await?;

    Ok(Json(DataResponse {
        data: BootstrapResponse {
            user,
            memberships,
            reconciliation,
        },
    }))
}

/// POST /api/v1/auth/onboarding
///
/// Self-serve onboarding completion: a user who signed in without an
/// invitation finishes the onboarding wizard and is marked onboarded.
/// Idempotent; the invitation path sets the flag through reconciliation
/// instead.
pub async fn complete_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let updated = UserRepo::mark_onboarded(&state.pool, auth.user_id).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }));
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "Onboarding completed");

    Ok(Json(DataResponse { data: user }))
}

// ---------------------------------------------------------------------------
// Shared sign-in plumbing
// ---------------------------------------------------------------------------

/// Exchange a provider code, mirror the profile, and run reconciliation.
async fn exchange_and_reconcile(
    state: &AppState,
    code: &str,
) -> AppResult<(User, Option<ReconciliationOutcome>)> {
    let profile = state.identity.exchange_code(code).await.map_err(|e| match e {
        IdentityError::InvalidCode => {
            AppError::Core(CoreError::Unauthorized("Invalid authorization code".into()))
        }
        IdentityError::Transport(msg) => AppError::Upstream(msg),
    })?;

    let user = UserRepo::upsert_from_identity(
        &state.pool,
        &UpsertUser {
            external_auth_id: profile.external_id,
            email: profile.email,
            full_name: profile.full_name,
        },
    )
    .await?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let reconciliation = run_reconciliation(state, user.id, &user.email).await;

    // Re-read so promoted role / onboarded flag are reflected in the
    // issued token and response.
    let user = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::InternalError("User vanished mid sign-in".into()))?;

    Ok((user, reconciliation))
}

/// Run invitation reconciliation, degrading on failure.
///
/// A database error here rolls back the reconciliation transaction and is
/// logged; the caller proceeds without a membership rather than failing
/// the sign-in.
async fn run_reconciliation(
    state: &AppState,
    user_id: timewheel_core::types::DbId,
    email: &str,
) -> Option<ReconciliationOutcome> {
    match Reconciler::reconcile_invitation(&state.pool, user_id, email).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::error!(user_id, error = %e, "Invitation reconciliation failed; continuing without membership");
            None
        }
    }
}

/// Issue an access/refresh token pair and persist the refresh session.
async fn issue_tokens(
    state: &AppState,
    user: User,
    reconciliation: Option<ReconciliationOutcome>,
) -> AppResult<AuthResponse> {
    let access_token = jwt::generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let (refresh_token, refresh_hash) = jwt::generate_refresh_token();
    let expires_at = chrono::Utc::now()
        + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
        reconciliation,
    })
}

/// Restrict post-login redirects to same-origin relative paths.
///
/// Anything that is not a plain absolute path (`/...` but not `//...`)
/// falls back to the dashboard, closing the open-redirect hole.
fn sanitize_redirect(redirect_to: Option<&str>) -> String {
    match redirect_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => "/dashboard".to_string(),
    }
}
