//! Shared query parameter types for API handlers.

use chrono::NaiveDate;
use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive`
/// flag (taxonomy levels, members).
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Inclusive date range (`?from=&to=`) used by time-entry listing,
/// analytics, and summaries.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DateRangeParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRangeParams {
    /// Reject inverted ranges before they reach SQL.
    pub fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.from > self.to {
            return Err(crate::error::AppError::BadRequest(
                "'from' must not be after 'to'".into(),
            ));
        }
        Ok(())
    }
}
