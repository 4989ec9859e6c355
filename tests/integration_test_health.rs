mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let res = app.get("/api/health/").await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["success"], true);
    assert!(body["timestamp"].is_string());
    assert_eq!(body["endpoints"]["appointments"], "/api/appointments/");
    assert_eq!(body["endpoints"]["teachers"], "/api/teacher-requests/");
}
