use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, CourseFileRepository, EmailService, MessageRepository,
    ParentRequestRepository, TeacherRequestRepository,
};
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub teacher_request_repo: Arc<dyn TeacherRequestRepository>,
    pub parent_request_repo: Arc<dyn ParentRequestRepository>,
    pub course_file_repo: Arc<dyn CourseFileRepository>,
    pub message_repo: Arc<dyn MessageRepository>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
