//! Server configuration, loaded once at startup.
//!
//! Everything the request path needs is read from the environment here and
//! carried through [`crate::state::AppState`]; handlers never read ambient
//! environment variables.

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except secrets have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Hosted identity provider configuration.
    pub identity: IdentityConfig,
    /// Hosted LLM configuration for time summaries.
    pub llm: LlmConfig,
    /// Optional SMTP configuration for invitation email delivery.
    pub mail: Option<MailConfig>,
}

/// Configuration for the hosted identity provider.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's backend API.
    pub api_base_url: String,
    /// Server-side secret key for backend API calls.
    pub secret_key: String,
    /// Webhook signing secret (`whsec_...`).
    pub webhook_secret: String,
}

/// Configuration for the hosted LLM used for summaries.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of the completions API.
    pub api_base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// SMTP configuration for outbound invitation email.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    /// `From:` address for invitation mail.
    pub from_address: String,
    /// Base URL of the web frontend, used to build accept links.
    pub app_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// # Panics
    ///
    /// Panics when a required secret (`JWT_SECRET`, `IDENTITY_SECRET_KEY`,
    /// `IDENTITY_WEBHOOK_SECRET`, `LLM_API_KEY`) is missing -- we want
    /// misconfiguration to fail at startup, not on first use.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            identity: IdentityConfig::from_env(),
            llm: LlmConfig::from_env(),
            mail: MailConfig::from_env(),
        }
    }
}

impl IdentityConfig {
    fn from_env() -> Self {
        let api_base_url = std::env::var("IDENTITY_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.identity.example.com".into());
        let secret_key = std::env::var("IDENTITY_SECRET_KEY")
            .expect("IDENTITY_SECRET_KEY must be set in the environment");
        let webhook_secret = std::env::var("IDENTITY_WEBHOOK_SECRET")
            .expect("IDENTITY_WEBHOOK_SECRET must be set in the environment");

        Self {
            api_base_url,
            secret_key,
            webhook_secret,
        }
    }
}

impl LlmConfig {
    fn from_env() -> Self {
        let api_base_url = std::env::var("LLM_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.llm.example.com".into());
        let api_key =
            std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set in the environment");
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

        Self {
            api_base_url,
            api_key,
            model,
        }
    }
}

impl MailConfig {
    /// Mail is optional: when `SMTP_HOST` is unset, invitation email is
    /// skipped and only logged.
    fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Timewheel <noreply@timewheel.app>".into()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        })
    }
}
