//! Client for the hosted identity provider's backend API.
//!
//! The provider owns session management; this backend only exchanges
//! one-time authorization codes for verified profiles and mirrors webhook
//! events. Exchange failures are not retried.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::IdentityConfig;

/// Verified profile returned by a successful code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProfile {
    /// The provider-side subject, stored as `users.external_auth_id`.
    #[serde(rename = "id")]
    pub external_id: String,
    /// Verified primary email address.
    pub email: String,
    pub full_name: Option<String>,
}

/// Errors from the identity provider client.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The authorization code was rejected (invalid, expired, or reused).
    #[error("Invalid or expired authorization code")]
    InvalidCode,

    /// The provider could not be reached or returned an unexpected response.
    #[error("Identity provider request failed: {0}")]
    Transport(String),
}

/// Exchanges authorization codes for verified profiles.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityError>;
}

/// Production client talking to the provider's HTTP API.
pub struct HostedIdentityProvider {
    client: reqwest::Client,
    api_base_url: String,
    secret_key: String,
}

impl HostedIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityError> {
        let url = format!("{}/v1/oauth/exchange", self.api_base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            return Err(IdentityError::InvalidCode);
        }
        if !status.is_success() {
            return Err(IdentityError::Transport(format!(
                "unexpected status {status} from {url}"
            )));
        }

        response
            .json::<IdentityProfile>()
            .await
            .map_err(|e| IdentityError::Transport(format!("malformed profile payload: {e}")))
    }
}
