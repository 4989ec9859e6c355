use tutoring_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::{EmailAttachment, EmailService},
    error::AppError,
    infra::repositories::{
        sqlite_appointment_repo::SqliteAppointmentRepo,
        sqlite_course_file_repo::SqliteCourseFileRepo,
        sqlite_message_repo::SqliteMessageRepo,
        sqlite_parent_request_repo::SqliteParentRequestRepo,
        sqlite_teacher_request_repo::SqliteTeacherRequestRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tera::Tera;
use tower::ServiceExt;
use serde_json::Value;
use uuid::Uuid;

/// One recorded outgoing email: recipient, subject, attachment count.
pub type SentEmail = (String, String, usize);

pub struct RecordingEmailService {
    pub sent: Mutex<Vec<SentEmail>>,
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _html_body: &str,
        attachments: &[EmailAttachment],
    ) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), subject.to_string(), attachments.len()));
        Ok(())
    }
}

pub struct FailingEmailService;

#[async_trait]
impl EmailService for FailingEmailService {
    async fn send(
        &self,
        _recipient: &str,
        _subject: &str,
        _html_body: &str,
        _attachments: &[EmailAttachment],
    ) -> Result<(), AppError> {
        Err(AppError::InternalWithMsg("mail service unreachable".to_string()))
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub emails: Option<Arc<RecordingEmailService>>,
}

impl TestApp {
    pub async fn new() -> Self {
        let recorder = Arc::new(RecordingEmailService { sent: Mutex::new(Vec::new()) });
        Self::build(recorder.clone(), Some(recorder)).await
    }

    /// Same app but every outgoing email fails; bookings and applications
    /// must still go through.
    pub async fn with_failing_email() -> Self {
        Self::build(Arc::new(FailingEmailService), None).await
    }

    async fn build(
        email_service: Arc<dyn EmailService>,
        emails: Option<Arc<RecordingEmailService>>,
    ) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let mut tera = Tera::default();
        tera.add_raw_template("teacher_application.html", "<html>Candidature de {{ full_name }}</html>").unwrap();
        tera.add_raw_template("appointment_booked.html", "<html>Rendez-vous pour {{ student_name }}</html>").unwrap();
        let templates = Arc::new(tera);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            admin_email: "admin@test.local".to_string(),
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            teacher_request_repo: Arc::new(SqliteTeacherRequestRepo::new(pool.clone())),
            parent_request_repo: Arc::new(SqliteParentRequestRepo::new(pool.clone())),
            course_file_repo: Arc::new(SqliteCourseFileRepo::new(pool.clone())),
            message_repo: Arc::new(SqliteMessageRepo::new(pool.clone())),
            email_service,
            templates,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            emails,
        }
    }

    pub async fn post_json(&self, uri: &str, payload: &Value) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn put_json(&self, uri: &str, payload: &Value) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn parse_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
