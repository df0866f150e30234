//! Organization input validation.

use crate::error::CoreError;

/// Maximum length of an organization name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of an organization slug.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Validate an organization name: non-blank, within length bounds.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Organization name must not be blank".into(),
        ));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Organization name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an organization slug.
///
/// Slugs appear in URLs: lowercase ASCII letters, digits, and hyphens,
/// with no leading or trailing hyphen.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Organization slug must be 1-{MAX_SLUG_LENGTH} characters"
        )));
    }
    let valid_chars = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid_chars || slug.starts_with('-') || slug.ends_with('-') {
        return Err(CoreError::Validation(format!(
            "Invalid organization slug: '{slug}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Acme Corp").is_ok());
    }

    #[test]
    fn overlong_name_is_rejected() {
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn slug_shape_is_enforced() {
        assert!(validate_slug("acme-corp-2").is_ok());
        assert!(validate_slug("Acme").is_err());
        assert!(validate_slug("acme corp").is_err());
        assert!(validate_slug("-acme").is_err());
        assert!(validate_slug("acme-").is_err());
        assert!(validate_slug("").is_err());
    }
}
