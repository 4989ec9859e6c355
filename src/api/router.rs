use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{appointment, course_file, health, message, parent_request, teacher_request};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health/", get(health::health_check))

        // Appointments
        .route("/api/appointments/", post(appointment::create_appointment).get(appointment::list_appointments))
        .route("/api/appointments/check-trial/{parent_id}/", get(appointment::check_trial))
        .route("/api/appointments/parent/{parent_id}/", get(appointment::list_parent_appointments))
        .route("/api/appointments/{id}/", get(appointment::get_appointment).delete(appointment::delete_appointment))
        .route("/api/appointments/{id}/assign/", put(appointment::assign_teacher))
        .route("/api/appointments/{id}/status/", put(appointment::update_status))

        // Course files
        .route("/api/appointments/{id}/files/", get(course_file::list_files).post(course_file::upload_file))
        .route("/api/files/{id}/", delete(course_file::delete_file))
        .route("/api/files/{id}/download/", get(course_file::download_file))

        // Teacher applications
        .route("/api/teacher-requests/", post(teacher_request::create_teacher_request).get(teacher_request::list_teacher_requests))
        .route("/api/teacher-requests/stats/", get(teacher_request::teacher_request_stats))
        .route("/api/teacher-requests/login/", post(teacher_request::login_teacher))
        .route("/api/teacher-requests/{id}/cv/", get(teacher_request::download_cv))
        .route("/api/teacher-requests/{id}/", get(teacher_request::get_teacher_request).put(teacher_request::update_teacher_request).delete(teacher_request::delete_teacher_request))

        // Parent requests
        .route("/api/parent-requests/", post(parent_request::create_parent_request).get(parent_request::list_parent_requests))
        .route("/api/parent-requests/login/", post(parent_request::login_parent))
        .route("/api/parent-requests/{id}/", get(parent_request::get_parent_request).put(parent_request::update_parent_request).delete(parent_request::delete_parent_request))

        // Messages
        .route("/api/messages/", post(message::create_message).get(message::list_messages))
        .route("/api/messages/{id}/read/", put(message::mark_message_read))

        // Base64 document payloads (CV, course files) exceed the default
        // 2 MB body limit by a wide margin.
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
