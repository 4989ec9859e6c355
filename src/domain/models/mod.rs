pub mod appointment;
pub mod course_file;
pub mod message;
pub mod parent_request;
pub mod teacher_request;
