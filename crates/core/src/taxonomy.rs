//! Validation for the area -> field -> activity taxonomy.
//!
//! Areas carry a display color; fields and activities only a name. All three
//! levels are soft-deactivated, never hard-deleted, so name validation also
//! applies on reactivation.

use crate::error::CoreError;

/// Maximum length for any taxonomy name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validate a taxonomy name (area, field, or activity).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an area display color: `#RRGGBB` hex notation.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(CoreError::Validation(format!(
            "Color must be #RRGGBB hex notation, got '{color}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_rejected() {
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn long_name_rejected() {
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn plain_name_accepted() {
        assert!(validate_name("Deep Work").is_ok());
    }

    #[test]
    fn hex_color_accepted() {
        assert!(validate_color("#1A2b3C").is_ok());
    }

    #[test]
    fn short_hex_rejected() {
        assert!(validate_color("#abc").is_err());
    }

    #[test]
    fn missing_hash_rejected() {
        assert!(validate_color("1A2b3Cff").is_err());
    }
}
