//! Request validation and normalization helpers.
//!
//! Text fields are trimmed before storage and before any emptiness check.

use serde::Deserialize;

use crate::error::AppError;

/// Returns the trimmed value of a required text field, or a 400 naming it.
pub fn required_text(field: &str, value: Option<&str>) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::BadRequest(format!("{} is required", field))),
    }
}

/// Trims an optional text field, defaulting to the empty string.
pub fn optional_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Tags arrive either as a structured array or as one comma-joined string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Joined(String),
}

/// Normalizes a tags value: a joined string is split on commas, every element
/// is trimmed, and empty elements are dropped.
pub fn normalize_tags(tags: Option<TagsField>) -> Vec<String> {
    let raw: Vec<String> = match tags {
        None => return Vec::new(),
        Some(TagsField::List(items)) => items,
        Some(TagsField::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
    };

    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
