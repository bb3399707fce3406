//! Validation schemas.
//!
//! A request DTO is a [`Schema`]: it deserializes (with type coercion),
//! normalizes itself, passes its per-field `validator` rules and finally its
//! cross-field refinements. Refinements only run once every field is valid.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::ids::is_object_id;

pub trait Schema: DeserializeOwned + Validate {
    /// Trims strings, lowercases emails and ids. Must be idempotent.
    fn normalize(&mut self) {}

    /// Cross-field rules, evaluated after [`Validate::validate`] succeeds.
    fn refine(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

pub fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trims and turns blank strings into `None`.
pub fn trim_optional(value: &mut Option<String>) {
    if let Some(inner) = value.as_mut() {
        trim(inner);
        if inner.is_empty() {
            *value = None;
        }
    }
}

pub fn normalize_email(value: &mut String) {
    trim(value);
    *value = value.to_lowercase();
}

pub fn normalize_id(value: &mut String) {
    trim(value);
    value.make_ascii_lowercase();
}

pub fn normalize_optional_id(value: &mut Option<String>) {
    trim_optional(value);
    if let Some(inner) = value.as_mut() {
        inner.make_ascii_lowercase();
    }
}

/// Lowercases, drops blanks and duplicates, keeps first-seen order.
pub fn normalize_ids(values: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(values.len());
    for mut value in values.drain(..) {
        normalize_id(&mut value);
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    *values = seen;
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if is_object_id(value) {
        Ok(())
    } else {
        Err(error("object_id", "must be a 24-character hexadecimal id"))
    }
}

pub fn validate_object_ids(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|value| is_object_id(value)) {
        Ok(())
    } else {
        Err(error(
            "object_id",
            "must only contain 24-character hexadecimal ids",
        ))
    }
}

/// Digits with optional leading `+`, spaces, dashes and parentheses; 7 to 15 digits.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let allowed = value
        .char_indices()
        .all(|(i, c)| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0));
    let digits = value.chars().filter(char::is_ascii_digit).count();

    if allowed && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(error("phone", "must be a valid phone number"))
    }
}

pub fn validate_password_strength(value: &str) -> Result<(), ValidationError> {
    let has_letter = value.chars().any(|c| c.is_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if has_letter && has_digit {
        Ok(())
    } else {
        Err(error(
            "password_strength",
            "Password must contain at least one letter and one number",
        ))
    }
}

/// Single-field refinement failure.
pub fn refinement(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error(code, message));
    errors
}

/// Fails on `field` when `end` is before `start`. Equal dates pass.
pub fn check_date_order(
    start: NaiveDate,
    end: NaiveDate,
    field: &'static str,
    message: &'static str,
) -> Result<(), ValidationErrors> {
    if end < start {
        Err(refinement(field, "date_order", message))
    } else {
        Ok(())
    }
}
