use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;

use super::report::CALL_TIME_FORMAT;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validation errors for domain model fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    #[error("invalid username: {0} (3-32 chars: lowercase letters, digits, . _ -)")]
    InvalidUsername(String),
    #[error("invalid date/time: {0} (expected YYYY-MM-DD HH:MM)")]
    InvalidTimestamp(String),
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
}

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{5,19}$").expect("valid hardcoded regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("valid hardcoded regex")
});

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9._\-]{2,31}$").expect("valid hardcoded regex"));

/// Validates that a text value is not blank.
pub fn validate_required(what: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(what))
    } else {
        Ok(())
    }
}

/// Validates a phone number: digits with optional `+`, spaces, dots, dashes, parentheses.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone(phone.to_string()))
    }
}

/// Validates an email address (`local@domain.tld`).
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validates a login name.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUsername(username.to_string()))
    }
}

/// Parses a `YYYY-MM-DD HH:MM` timestamp.
pub fn validate_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDateTime::parse_from_str(value.trim(), CALL_TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTimestamp(value.to_string()))
}

/// Validates a new password and its confirmation.
pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
