use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const REQUEST_STATUSES: [&str; 3] = ["pending", "approved", "rejected"];

/// Documents every applicant has to provide before the application is accepted.
pub const REQUIRED_DOCUMENTS: [&str; 4] = [
    "Pièce d'identité",
    "Justificatif de domicile",
    "RIB pour paiement",
    "Copie du diplôme",
];

/// One uploaded application document, as the frontend sends it: a display
/// type, the original file name and a base64 payload (possibly carrying a
/// `data:` URI prefix).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApplicationDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub name: String,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TeacherRequest {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub zone: String,
    pub school: String,
    pub diplome: String,
    pub qualification: String,
    pub experience: String,
    pub niveau_accepter: String,
    pub format_cours: String,
    pub matiere_niveau: String,
    pub subjects_json: String,
    pub availability: String,
    pub motivation: String,
    pub cv_file: String,
    pub cv_filename: String,
    pub documents_json: String,
    pub accept_terms: bool,
    pub accept_verification: bool,
    pub accept_profile_sharing: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeacherRequest {
    pub fn subjects(&self) -> Vec<String> {
        serde_json::from_str(&self.subjects_json).unwrap_or_default()
    }

    pub fn documents(&self) -> Vec<ApplicationDocument> {
        serde_json::from_str(&self.documents_json).unwrap_or_default()
    }
}

pub struct NewTeacherRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub zone: String,
    pub school: String,
    pub diplome: String,
    pub qualification: String,
    pub experience: String,
    pub niveau_accepter: String,
    pub format_cours: String,
    pub matiere_niveau: String,
    pub subjects_json: String,
    pub availability: String,
    pub motivation: String,
    pub cv_file: String,
    pub cv_filename: String,
    pub documents_json: String,
    pub accept_terms: bool,
    pub accept_verification: bool,
    pub accept_profile_sharing: bool,
}

/// Per-status counters returned by the stats endpoint and the list view.
#[derive(Debug, Serialize, Clone)]
pub struct RequestStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}
