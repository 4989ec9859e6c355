pub mod sqlite_appointment_repo;
pub mod sqlite_course_file_repo;
pub mod sqlite_message_repo;
pub mod sqlite_parent_request_repo;
pub mod sqlite_teacher_request_repo;

pub mod postgres_appointment_repo;
pub mod postgres_course_file_repo;
pub mod postgres_message_repo;
pub mod postgres_parent_request_repo;
pub mod postgres_teacher_request_repo;
