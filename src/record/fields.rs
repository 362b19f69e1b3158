//! Validated text-field helpers shared by all domain contexts.
//!
//! Field bounds mirror the column widths of the persisted schema. Inputs
//! are trimmed before validation; lengths are counted in characters, not
//! bytes.

use thiserror::Error;

/// Errors returned while validating scalar entity fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A required field is empty after trimming.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// A field exceeds its column width.
    #[error("{field} exceeds the maximum length of {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum number of characters allowed.
        max: usize,
    },

    /// An e-mail address is not well formed.
    #[error("invalid e-mail address: {0}")]
    InvalidEmail(String),
}

/// Validates a required bounded text field.
///
/// # Errors
///
/// Returns [`FieldError::Empty`] when the trimmed value is empty and
/// [`FieldError::TooLong`] when it exceeds `max` characters.
pub fn required_text(
    field: &'static str,
    max: usize,
    value: impl Into<String>,
) -> Result<String, FieldError> {
    let trimmed = value.into().trim().to_owned();
    if trimmed.is_empty() {
        return Err(FieldError::Empty(field));
    }
    check_length(field, max, &trimmed)?;
    Ok(trimmed)
}

/// Validates an optional bounded text field.
///
/// A value that is empty after trimming is treated as absent.
///
/// # Errors
///
/// Returns [`FieldError::TooLong`] when the value exceeds `max` characters.
pub fn optional_text(
    field: &'static str,
    max: usize,
    value: Option<String>,
) -> Result<Option<String>, FieldError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim().to_owned();
    if trimmed.is_empty() {
        return Ok(None);
    }
    check_length(field, max, &trimmed)?;
    Ok(Some(trimmed))
}

/// Validates a well-formed e-mail address.
///
/// The check is structural: one `@`, a non-empty local part, and a domain
/// containing at least one dot, with no whitespace anywhere.
///
/// # Errors
///
/// Returns [`FieldError::InvalidEmail`] when the value does not have that
/// shape.
pub fn email(value: impl Into<String>) -> Result<String, FieldError> {
    let raw = value.into();
    let trimmed = raw.trim();
    let mut parts = trimmed.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    let has_more_parts = parts.next().is_some();
    let is_valid = !local.is_empty()
        && !domain.is_empty()
        && !has_more_parts
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !trimmed.chars().any(char::is_whitespace);

    if !is_valid {
        return Err(FieldError::InvalidEmail(raw));
    }

    Ok(trimmed.to_owned())
}

fn check_length(field: &'static str, max: usize, value: &str) -> Result<(), FieldError> {
    if value.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}
