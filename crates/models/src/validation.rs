//! Field-level validation and normalisation shared by every write path.
//!
//! Checks accumulate into [`FieldErrors`] so a request reports every bad
//! field at once instead of failing on the first.

use common::types::FieldError;

use crate::errors::ModelError;

#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, format!("{field} is required"));
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.push(field, format!("{field} must be at most {max} characters"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if validate_email(value).is_err() {
            self.push(field, "invalid email address");
        }
        self
    }

    pub fn cnic(&mut self, field: &str, value: &str) -> &mut Self {
        if normalize_cnic(value).is_none() {
            self.push(field, "CNIC must contain exactly 13 digits (e.g. 35202-1234567-1)");
        }
        self
    }

    pub fn plate(&mut self, field: &str, value: &str) -> &mut Self {
        if normalize_plate(value).is_none() {
            self.push(field, "plate number must be 2-20 letters, digits or dashes");
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: i64) -> &mut Self {
        if value <= 0 {
            self.push(field, format!("{field} must be positive"));
        }
        self
    }

    pub fn range(&mut self, field: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if !value.is_finite() || value < min || value > max {
            self.push(field, format!("{field} must be between {min} and {max}"));
        }
        self
    }

    pub fn is_empty(&self) -> bool { self.errors.is_empty() }

    pub fn into_inner(self) -> Vec<FieldError> { self.errors }

    /// `Ok(())` when nothing was recorded, otherwise [`ModelError::Fields`].
    pub fn finish(self) -> Result<(), ModelError> {
        if self.errors.is_empty() { Ok(()) } else { Err(ModelError::Fields(self.errors)) }
    }
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    };
    if !valid || email.len() > 255 || email.contains(char::is_whitespace) {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Canonical `NNNNN-NNNNNNN-N` form, or `None` when the input does not hold
/// exactly 13 digits (dashes and spaces are tolerated).
pub fn normalize_cnic(raw: &str) -> Option<String> {
    if raw.chars().any(|c| !(c.is_ascii_digit() || c == '-' || c == ' ')) {
        return None;
    }
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 13 {
        return None;
    }
    Some(format!("{}-{}-{}", &digits[..5], &digits[5..12], &digits[12..]))
}

/// Upper-cased plate with inner whitespace collapsed to single dashes.
pub fn normalize_plate(raw: &str) -> Option<String> {
    let joined = raw.split_whitespace().collect::<Vec<_>>().join("-").to_uppercase();
    let ok_chars = joined.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let len = joined.chars().filter(|c| c.is_ascii_alphanumeric()).count();
    if !ok_chars || !(2..=20).contains(&len) || joined.len() > 32 {
        return None;
    }
    Some(joined)
}
