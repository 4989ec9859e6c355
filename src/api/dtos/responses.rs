use crate::domain::models::{
    appointment::Appointment,
    course_file::CourseFileMeta,
    message::Message,
    parent_request::ParentRequest,
    teacher_request::TeacherRequest,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Boundary shape of an appointment: camelCase field names, `HH:MM` clock
/// time. The snake_case model never leaks past this mapping.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: i64,
    pub parent_id: String,
    pub parent_name: String,
    pub parent_email: String,
    pub parent_phone: String,
    pub student_name: String,
    pub subject: String,
    pub level: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub duration: f64,
    pub location: String,
    pub notes: String,
    pub price_per_hour: f64,
    pub total_amount: f64,
    pub is_trial_course: bool,
    pub assigned_teacher_id: Option<String>,
    pub assigned_teacher: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            parent_id: a.parent_id,
            parent_name: a.parent_name,
            parent_email: a.parent_email,
            parent_phone: a.parent_phone,
            student_name: a.student_name,
            subject: a.subject,
            level: a.level,
            preferred_date: a.preferred_date.format("%Y-%m-%d").to_string(),
            preferred_time: a.preferred_time.format("%H:%M").to_string(),
            duration: a.duration,
            location: a.location,
            notes: a.notes,
            price_per_hour: a.price_per_hour,
            total_amount: a.total_amount,
            is_trial_course: a.is_trial_course,
            assigned_teacher_id: a.assigned_teacher_id,
            assigned_teacher: a.assigned_teacher,
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Application view without the password hash or the base64 CV payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRequestResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub zone: String,
    pub school: String,
    pub diplome: String,
    pub qualification: String,
    pub experience: String,
    pub niveau_accepter: String,
    pub format_cours: String,
    pub matiere_niveau: String,
    pub subjects: Vec<String>,
    pub availability: String,
    pub motivation: String,
    pub cv_file_name: String,
    pub documents_count: usize,
    pub accept_terms: bool,
    pub accept_verification: bool,
    pub accept_profile_sharing: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeacherRequest> for TeacherRequestResponse {
    fn from(t: TeacherRequest) -> Self {
        let subjects = t.subjects();
        let documents_count = t.documents().len();
        Self {
            id: t.id,
            full_name: t.full_name,
            email: t.email,
            phone: t.phone,
            zone: t.zone,
            school: t.school,
            diplome: t.diplome,
            qualification: t.qualification,
            experience: t.experience,
            niveau_accepter: t.niveau_accepter,
            format_cours: t.format_cours,
            matiere_niveau: t.matiere_niveau,
            subjects,
            availability: t.availability,
            motivation: t.motivation,
            cv_file_name: t.cv_filename,
            documents_count,
            accept_terms: t.accept_terms,
            accept_verification: t.accept_verification,
            accept_profile_sharing: t.accept_profile_sharing,
            status: t.status,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRequestResponse {
    pub id: i64,
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub child_name: String,
    pub child_age: i32,
    pub child_level: String,
    pub subjects: Vec<String>,
    pub availability: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ParentRequest> for ParentRequestResponse {
    fn from(p: ParentRequest) -> Self {
        let subjects = p.subjects();
        Self {
            id: p.id,
            parent_name: p.parent_name,
            email: p.email,
            phone: p.phone,
            address: p.address,
            child_name: p.child_name,
            child_age: p.child_age,
            child_level: p.child_level,
            subjects,
            availability: p.availability,
            status: p.status,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFileResponse {
    pub id: i64,
    pub appointment_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<CourseFileMeta> for CourseFileResponse {
    fn from(f: CourseFileMeta) -> Self {
        Self {
            id: f.id,
            appointment_id: f.appointment_id,
            file_name: f.file_name,
            content_type: f.content_type,
            size_bytes: f.size_bytes,
            uploaded_by: f.uploaded_by,
            created_at: f.created_at,
        }
    }
}

/// One thread entry; replies are grouped under their parent, one level deep.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_role: String,
    pub content: String,
    pub parent_message_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<MessageResponse>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            sender_id: m.sender_id,
            sender_name: m.sender_name,
            sender_role: m.sender_role,
            content: m.content,
            parent_message_id: m.parent_message_id,
            is_read: m.is_read,
            created_at: m.created_at,
            replies: Vec::new(),
        }
    }
}
