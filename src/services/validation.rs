//! Field validators shared by the registry service and the browser form.
//!
//! Each validator returns the cleaned value or a [`FieldError`] naming the
//! offending field, so callers can either stop at the first failure or collect
//! all of them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Requires a value that is present and not blank. The value is kept verbatim.
pub fn require(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(FieldError::new(field, "This field is required.")),
    }
}

/// Blank values collapse to `None`.
#[must_use]
pub fn optional(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

/// A rating must be a number between 0 and 5 inclusive.
pub fn rating(field: &'static str, value: Option<&str>) -> Result<String, FieldError> {
    let value = require(field, value)?;
    match value.trim().parse::<f64>() {
        Ok(score) if (0.0..=5.0).contains(&score) => Ok(value),
        _ => Err(FieldError::new(
            field,
            "Rating must be a number between 0 and 5.",
        )),
    }
}
