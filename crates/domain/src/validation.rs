// Copyright (C) 2026 Inkleaf
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation helpers.
//!
//! These functions are pure, deterministic, and have no side effects.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Normalizes and validates an email address.
///
/// The address is trimmed and lowercased before validation, so stored
/// emails are always in canonical form.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is structurally
/// invalid (missing or repeated `@`, empty local part, domain without a
/// dot, or disallowed characters).
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let normalized: String = email.trim().to_lowercase();

    let mut parts = normalized.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DomainError::InvalidEmail(String::from(
            "address must contain exactly one '@'",
        )));
    };

    // Rule: local part must be non-empty and limited to word characters
    // plus '.', '-', '+'
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+'))
    {
        return Err(DomainError::InvalidEmail(String::from(
            "invalid characters before '@'",
        )));
    }

    // Rule: domain must be dot-separated labels, each non-empty, with a
    // top-level label of at least two characters
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(DomainError::InvalidEmail(String::from(
            "domain must contain a '.'",
        )));
    }
    for label in &labels {
        if label.is_empty()
            || !label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(DomainError::InvalidEmail(String::from(
                "invalid characters in domain",
            )));
        }
    }
    if labels
        .last()
        .is_none_or(|tld| tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()))
    {
        return Err(DomainError::InvalidEmail(String::from(
            "invalid top-level domain",
        )));
    }

    Ok(normalized)
}

/// Validates a phone number.
///
/// Accepted shape: an optional leading `+`, then at least ten characters
/// drawn from digits, spaces, and hyphens.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the number is malformed.
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    let rest: &str = phone.strip_prefix('+').unwrap_or(phone);

    if rest.len() < 10 {
        return Err(DomainError::InvalidPhone(String::from(
            "number must contain at least 10 digits",
        )));
    }
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(DomainError::InvalidPhone(String::from(
            "number may only contain digits, spaces, and hyphens",
        )));
    }

    Ok(())
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` naming the offending field.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format).map_err(|_| DomainError::DateParseError {
        field,
        date_string: value.to_string(),
    })
}
