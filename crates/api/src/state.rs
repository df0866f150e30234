use std::sync::Arc;

use crate::clients::identity::IdentityProvider;
use crate::clients::llm::SummaryModel;
use crate::clients::mailer::Mailer;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: timewheel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hosted identity provider client (trait object so tests can stub it).
    pub identity: Arc<dyn IdentityProvider>,
    /// Hosted LLM client for time summaries (trait object, same reason).
    pub llm: Arc<dyn SummaryModel>,
    /// Outbound invitation mail, absent when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}
