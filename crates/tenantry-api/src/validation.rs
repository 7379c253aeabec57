//! Request field validation.

use std::sync::LazyLock;

use crate::error::ApiError;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$"
    ).expect("EMAIL_REGEX is a valid regex pattern")
});

/// Maximum allowed email length (per RFC 5321).
const MAX_EMAIL_LENGTH: usize = 254;

pub const MAX_ORGANIZATION_NAME_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Organization names are 1 to 100 characters.
pub fn validate_organization_name(field: &str, name: &str) -> Result<(), ApiError> {
    let length = name.chars().count();
    if length == 0 || length > MAX_ORGANIZATION_NAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "{field} must be between 1 and {MAX_ORGANIZATION_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(email) {
        return Err(ApiError::BadRequest(
            "email must be a valid email address".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_name_bounds() {
        assert!(validate_organization_name("organization_name", "A").is_ok());
        assert!(validate_organization_name("organization_name", &"x".repeat(100)).is_ok());
        assert!(validate_organization_name("organization_name", "").is_err());
        assert!(validate_organization_name("organization_name", &"x".repeat(101)).is_err());
        // Counted in characters, not bytes.
        assert!(validate_organization_name("organization_name", &"é".repeat(100)).is_ok());
    }

    #[test]
    fn name_error_mentions_field() {
        let err = validate_organization_name("new_organization_name", "").unwrap_err();
        assert!(err.to_string().starts_with("new_organization_name"));
    }

    #[test]
    fn valid_emails() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user+tag@example.com").is_ok());
        assert!(validate_email("First.Last@mail.example.co.uk").is_ok());
    }

    #[test]
    fn invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@@example.com").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
    }
}
