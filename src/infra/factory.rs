use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tera::Tera;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_appointment_repo::PostgresAppointmentRepo,
    postgres_course_file_repo::PostgresCourseFileRepo,
    postgres_message_repo::PostgresMessageRepo,
    postgres_parent_request_repo::PostgresParentRequestRepo,
    postgres_teacher_request_repo::PostgresTeacherRequestRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo,
    sqlite_course_file_repo::SqliteCourseFileRepo,
    sqlite_message_repo::SqliteMessageRepo,
    sqlite_parent_request_repo::SqliteParentRequestRepo,
    sqlite_teacher_request_repo::SqliteTeacherRequestRepo,
};
use crate::state::AppState;

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("teacher_application.html", include_str!("../templates/teacher_application.html"))
        .expect("Failed to load teacher application template");
    tera.add_raw_template("appointment_booked.html", include_str!("../templates/appointment_booked.html"))
        .expect("Failed to load appointment template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let templates = Arc::new(load_templates());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            appointment_repo: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            teacher_request_repo: Arc::new(PostgresTeacherRequestRepo::new(pool.clone())),
            parent_request_repo: Arc::new(PostgresParentRequestRepo::new(pool.clone())),
            course_file_repo: Arc::new(PostgresCourseFileRepo::new(pool.clone())),
            message_repo: Arc::new(PostgresMessageRepo::new(pool.clone())),
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            teacher_request_repo: Arc::new(SqliteTeacherRequestRepo::new(pool.clone())),
            parent_request_repo: Arc::new(SqliteParentRequestRepo::new(pool.clone())),
            course_file_repo: Arc::new(SqliteCourseFileRepo::new(pool.clone())),
            message_repo: Arc::new(SqliteMessageRepo::new(pool.clone())),
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
