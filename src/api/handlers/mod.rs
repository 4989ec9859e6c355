pub mod appointment;
pub mod course_file;
pub mod health;
pub mod message;
pub mod parent_request;
pub mod teacher_request;

use crate::error::AppError;

/// Presence check for the manually-validated payloads. Returns the trimmed
/// value or a French error naming the boundary field.
pub(crate) fn required_text(value: Option<&str>, label: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("Le champ \"{}\" est obligatoire", label))),
    }
}

pub(crate) fn required_number(value: Option<f64>, label: &str) -> Result<f64, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("Le champ \"{}\" est obligatoire", label)))
}
