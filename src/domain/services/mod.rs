pub mod notifications;
pub mod password;
