mod common;

use axum::http::{header, StatusCode};
use base64::{engine::general_purpose, Engine as _};
use common::{body_bytes, parse_body, TestApp};
use serde_json::{json, Value};

fn appointment_payload() -> Value {
    json!({
        "parentId": "p1",
        "parentName": "Marie Dupont",
        "parentEmail": "marie@example.com",
        "parentPhone": "0612345678",
        "studentName": "Lucas Dupont",
        "subject": "Mathématiques",
        "level": "Terminale",
        "preferredDate": "2026-09-15",
        "preferredTime": "17:30",
        "duration": 1.0,
        "location": "online",
        "pricePerHour": 30.0,
        "totalAmount": 30.0,
        "isTrialCourse": false
    })
}

async fn create_appointment(app: &TestApp) -> i64 {
    let res = app.post_json("/api/appointments/", &appointment_payload()).await;
    parse_body(res).await["data"]["id"].as_i64().unwrap()
}

fn upload_payload(file_name: &str, content: &[u8]) -> Value {
    json!({
        "fileName": file_name,
        "data": general_purpose::STANDARD.encode(content),
        "uploadedBy": "teacher-t42"
    })
}

#[tokio::test]
async fn test_upload_and_list() {
    let app = TestApp::new().await;
    let id = create_appointment(&app).await;

    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &upload_payload("exercices.pdf", b"%PDF-1.4 contenu"))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["fileName"], "exercices.pdf");
    assert_eq!(body["data"]["contentType"], "application/pdf");
    assert_eq!(body["data"]["sizeBytes"], 16);
    // The payload itself never appears in listings.
    assert!(body["data"].get("data").is_none());

    let res = app.get(&format!("/api/appointments/{}/files/", id)).await;
    let body = parse_body(res).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["uploadedBy"], "teacher-t42");
}

#[tokio::test]
async fn test_upload_requires_existing_appointment() {
    let app = TestApp::new().await;

    let res = app
        .post_json("/api/appointments/99999/files/", &upload_payload("exercices.pdf", b"data"))
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.get("/api/appointments/99999/files/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_rejects_bad_files() {
    let app = TestApp::new().await;
    let id = create_appointment(&app).await;

    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &upload_payload("virus.exe", b"MZ"))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .post_json(
            &format!("/api/appointments/{}/files/", id),
            &json!({"fileName": "notes.txt", "data": "pas du base64 !!!"}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &json!({"fileName": "notes.txt"}))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_rejects_oversize_file() {
    let app = TestApp::new().await;
    let id = create_appointment(&app).await;

    // One byte over the 20 MB decoded bound.
    let oversize = vec![0u8; 20 * 1024 * 1024 + 1];
    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &upload_payload("gros.pdf", &oversize))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("20 Mo"));

    let res = app.get(&format!("/api/appointments/{}/files/", id)).await;
    let body = parse_body(res).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_download_round_trip() {
    let app = TestApp::new().await;
    let id = create_appointment(&app).await;

    let content = b"contenu du devoir".to_vec();
    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &upload_payload("devoir.txt", &content))
        .await;
    let file_id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    let res = app.get(&format!("/api/files/{}/download/", file_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain");
    let disposition = res.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.contains("devoir.txt"));
    assert_eq!(body_bytes(res).await, content);

    let res = app.get("/api/files/99999/download/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new().await;
    let id = create_appointment(&app).await;

    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &upload_payload("scan.png", b"PNG"))
        .await;
    let file_id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    let res = app.delete(&format!("/api/files/{}/", file_id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/files/{}/download/", file_id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_files_removed_with_appointment() {
    let app = TestApp::new().await;
    let id = create_appointment(&app).await;

    let res = app
        .post_json(&format!("/api/appointments/{}/files/", id), &upload_payload("cours.pdf", b"pdf"))
        .await;
    let file_id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    let res = app.delete(&format!("/api/appointments/{}/", id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/files/{}/download/", file_id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
