use crate::domain::models::{
    appointment::{Appointment, NewAppointment},
    course_file::{CourseFile, CourseFileMeta, NewCourseFile},
    message::{Message, NewMessage},
    parent_request::{NewParentRequest, ParentRequest},
    teacher_request::{NewTeacherRequest, RequestStats, TeacherRequest},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Persists a new appointment with status `pending`. For trial courses the
    /// existence check and the insert run in one transaction, and a partial
    /// unique index backs the same invariant at the schema level; either path
    /// reports `TrialAlreadyUsed` without persisting anything.
    async fn create(&self, new: &NewAppointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError>;
    async fn list(&self) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_parent(&self, parent_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn has_used_trial(&self, parent_id: &str) -> Result<bool, AppError>;
    /// Writes the mutable fields (teacher assignment, status, updated_at).
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    /// Writes only the status, leaving the teacher assignment untouched even
    /// when it changed concurrently.
    async fn update_status(&self, id: i64, status: &str) -> Result<Appointment, AppError>;
    /// Hard delete; removes attached course files in the same transaction.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait TeacherRequestRepository: Send + Sync {
    async fn create(&self, new: &NewTeacherRequest) -> Result<TeacherRequest, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TeacherRequest>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<TeacherRequest>, AppError>;
    async fn list(&self) -> Result<Vec<TeacherRequest>, AppError>;
    async fn update_status(&self, id: i64, status: &str) -> Result<TeacherRequest, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn stats(&self) -> Result<RequestStats, AppError>;
    async fn recent(&self, limit: i64) -> Result<Vec<TeacherRequest>, AppError>;
}

#[async_trait]
pub trait ParentRequestRepository: Send + Sync {
    async fn create(&self, new: &NewParentRequest) -> Result<ParentRequest, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<ParentRequest>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<ParentRequest>, AppError>;
    async fn list(&self) -> Result<Vec<ParentRequest>, AppError>;
    async fn update_status(&self, id: i64, status: &str) -> Result<ParentRequest, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait CourseFileRepository: Send + Sync {
    async fn create(&self, new: &NewCourseFile) -> Result<CourseFileMeta, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<CourseFile>, AppError>;
    async fn list_by_appointment(&self, appointment_id: i64) -> Result<Vec<CourseFileMeta>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, new: &NewMessage) -> Result<Message, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;
    async fn list(&self) -> Result<Vec<Message>, AppError>;
    async fn mark_read(&self, id: i64) -> Result<Message, AppError>;
}

pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachments: &[EmailAttachment],
    ) -> Result<(), AppError>;
}
