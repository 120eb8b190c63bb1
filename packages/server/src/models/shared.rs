use common::slug::{is_url_safe, slugify};

use crate::error::AppError;

/// Validate a trimmed required text field (1-`max` Unicode characters).
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    validate_required("Title", title, 256)
}

/// Final slug for a save: the trimmed `provided` slug, or one derived from
/// `source` when none was sent.
pub fn resolve_slug(source: &str, provided: Option<&str>) -> Result<String, AppError> {
    let slug = match provided {
        Some(slug) => slug.trim().to_string(),
        None => slugify(source),
    };
    if slug.is_empty() {
        return Err(AppError::Validation("Slug must not be empty".into()));
    }
    if slug.chars().count() > 256 {
        return Err(AppError::Validation("Slug must be at most 256 characters".into()));
    }
    if !is_url_safe(&slug) {
        return Err(AppError::Validation(
            "Slug may only contain lowercase letters, digits, and hyphens".into(),
        ));
    }
    Ok(slug)
}

/// Trim an optional text field; blank becomes `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validate a sort position (must be >= 0).
pub fn validate_sort_order(sort_order: i32) -> Result<(), AppError> {
    if sort_order < 0 {
        return Err(AppError::Validation("Sort order must be >= 0".into()));
    }
    Ok(())
}
