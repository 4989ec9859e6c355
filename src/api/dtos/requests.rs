use crate::domain::models::teacher_request::ApplicationDocument;
use serde::Deserialize;

/// Booking payload. Every field arrives optional so that missing-field errors
/// can name the offending field in French instead of surfacing a serde
/// rejection; the handler validates presence and types before anything is
/// persisted.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAppointmentRequest {
    pub parent_id: Option<String>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub student_name: Option<String>,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub duration: Option<f64>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub price_per_hour: Option<f64>,
    pub total_amount: Option<f64>,
    pub is_trial_course: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignTeacherRequest {
    pub teacher_id: Option<String>,
    pub teacher_name: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTeacherRequestPayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub zone: Option<String>,
    pub school: Option<String>,
    pub diplome: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub niveau_accepter: Option<String>,
    pub format_cours: Option<String>,
    // The signup form sends this one capitalized.
    #[serde(alias = "MatiereNiveau")]
    pub matiere_niveau: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub availability: Option<String>,
    pub motivation: Option<String>,
    pub cv_file: Option<String>,
    pub cv_file_name: Option<String>,
    pub documents: Option<Vec<ApplicationDocument>>,
    pub accept_terms: Option<bool>,
    pub accept_verification: Option<bool>,
    pub accept_profile_sharing: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateParentRequestPayload {
    pub parent_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
    pub child_name: Option<String>,
    pub child_age: Option<i32>,
    pub child_level: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub availability: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Course files arrive as base64 JSON, the same shape the signup documents
/// use. Decoded size and extension are validated before any write.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadCourseFileRequest {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Option<String>,
    pub uploaded_by: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMessageRequest {
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub sender_role: Option<String>,
    pub content: Option<String>,
    pub parent_message_id: Option<i64>,
}
