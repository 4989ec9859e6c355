use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Decoded size bound for uploaded course documents.
pub const MAX_FILE_BYTES: usize = 20 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 7] = ["pdf", "doc", "docx", "jpg", "jpeg", "png", "txt"];

/// Full record including the binary payload. Only fetched for downloads.
#[derive(Debug, FromRow, Clone)]
pub struct CourseFile {
    pub id: i64,
    pub appointment_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub data: Vec<u8>,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

/// Listing view without the payload.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CourseFileMeta {
    pub id: i64,
    pub appointment_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewCourseFile {
    pub appointment_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub uploaded_by: String,
}

/// Extension check against the allow-list, case-insensitive. Files without an
/// extension are rejected.
pub fn extension_allowed(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allow_list() {
        assert!(extension_allowed("devoir.pdf"));
        assert!(extension_allowed("Photo.JPG"));
        assert!(extension_allowed("rapport.final.docx"));
        assert!(!extension_allowed("script.exe"));
        assert!(!extension_allowed("sans_extension"));
        assert!(!extension_allowed(".pdf"));
    }
}
