//! Flat record representation and field conversion helpers.
//!
//! The record store is schemaless: a record is a mapping of field names to
//! string values. Typed entities convert to and from this representation at
//! exactly one boundary (each type's `to_record`/`from_record`), so parsing
//! is never scattered through call sites.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// A stored record: field name to string value.
pub type Record = HashMap<String, String>;

/// Returns the string value of `field`.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the field is absent.
pub fn require_str<'a>(record: &'a Record, field: &str) -> Result<&'a str, DomainError> {
    record
        .get(field)
        .map(String::as_str)
        .ok_or_else(|| DomainError::Validation(format!("missing field: {field}")))
}

/// Parses `field` as a signed integer.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the field is absent or not an
/// integer.
pub fn require_i64(record: &Record, field: &str) -> Result<i64, DomainError> {
    require_str(record, field)?
        .parse()
        .map_err(|_| DomainError::Validation(format!("field is not an integer: {field}")))
}

/// Parses `field` as an integer, falling back to `default` when absent.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the field is present but not an
/// integer.
pub fn i64_or(record: &Record, field: &str, default: i64) -> Result<i64, DomainError> {
    match record.get(field) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| DomainError::Validation(format!("field is not an integer: {field}"))),
    }
}

/// Returns the string value of `field`, or `default` when absent.
#[must_use]
pub fn str_or<'a>(record: &'a Record, field: &str, default: &'a str) -> &'a str {
    record.get(field).map_or(default, String::as_str)
}

/// Parses `field` as an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the field is absent or malformed.
pub fn require_datetime(record: &Record, field: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = require_str(record, field)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DomainError::Validation(format!("field is not a timestamp: {field}")))
}
