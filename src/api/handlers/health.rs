use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "L'API fonctionne correctement",
        "timestamp": Utc::now(),
        "endpoints": {
            "health": "/api/health/",
            "appointments": "/api/appointments/",
            "teachers": "/api/teacher-requests/",
            "parents": "/api/parent-requests/",
            "messages": "/api/messages/",
        },
    }))
}
