//! Time-entry domain rules: duration bounds and the post-creation edit window.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum hours a single entry may record (one day).
pub const MAX_DURATION_HOURS: f64 = 24.0;

/// How long after creation an entry may still be edited inline.
pub const EDIT_WINDOW_HOURS: i64 = 24;

/// Validate a logged duration in hours.
pub fn validate_duration(hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(CoreError::Validation(
            "Duration must be a positive number of hours".into(),
        ));
    }
    if hours > MAX_DURATION_HOURS {
        return Err(CoreError::Validation(format!(
            "Duration must not exceed {MAX_DURATION_HOURS} hours"
        )));
    }
    Ok(())
}

/// Returns `true` if an entry created at `created_at` may still be edited.
pub fn within_edit_window(created_at: Timestamp, now: Timestamp) -> bool {
    now - created_at <= chrono::Duration::hours(EDIT_WINDOW_HOURS)
}
