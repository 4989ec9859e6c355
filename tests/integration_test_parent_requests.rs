mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn request_payload(email: &str) -> Value {
    json!({
        "parentName": "Claire Rousseau",
        "email": email,
        "phone": "0622334455",
        "address": "12 rue des Lilas, Lyon",
        "password": "secret123",
        "childName": "Théo Rousseau",
        "childAge": 14,
        "childLevel": "4ème",
        "subjects": ["Mathématiques", "Français"],
        "availability": "Mercredi après-midi"
    })
}

#[tokio::test]
async fn test_create_parent_request() {
    let app = TestApp::new().await;

    let res = app.post_json("/api/parent-requests/", &request_payload("claire@example.com")).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = parse_body(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["childAge"], 14);
    assert_eq!(body["data"]["subjects"], json!(["Mathématiques", "Français"]));
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_parent_request_validation() {
    let app = TestApp::new().await;

    let mut payload = request_payload("claire@example.com");
    payload.as_object_mut().unwrap().remove("childName");
    let res = app.post_json("/api/parent-requests/", &payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut payload = request_payload("claire@example.com");
    payload["childAge"] = json!(40);
    let res = app.post_json("/api/parent-requests/", &payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut payload = request_payload("claire@example.com");
    payload.as_object_mut().unwrap().remove("email");
    let res = app.post_json("/api/parent-requests/", &payload).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_parent_email() {
    let app = TestApp::new().await;

    let res = app.post_json("/api/parent-requests/", &request_payload("claire@example.com")).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.post_json("/api/parent-requests/", &request_payload("Claire@Example.com")).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_parent_login_gating() {
    let app = TestApp::new().await;

    let res = app.post_json("/api/parent-requests/", &request_payload("claire@example.com")).await;
    let id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    let login = json!({"email": "claire@example.com", "password": "secret123"});

    let res = app.post_json("/api/parent-requests/login/", &login).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    app.put_json(&format!("/api/parent-requests/{}/", id), &json!({"status": "approved"})).await;
    let res = app.post_json("/api/parent-requests/login/", &login).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["role"], "parent");

    let res = app
        .post_json("/api/parent-requests/login/", &json!({"email": "claire@example.com", "password": "faux"}))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_get_update_delete() {
    let app = TestApp::new().await;

    app.post_json("/api/parent-requests/", &request_payload("a@example.com")).await;
    app.post_json("/api/parent-requests/", &request_payload("b@example.com")).await;

    let res = app.get("/api/parent-requests/").await;
    let body = parse_body(res).await;
    assert_eq!(body["count"], 2);
    let id = body["data"][0]["id"].as_i64().unwrap();

    let res = app.get(&format!("/api/parent-requests/{}/", id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.put_json(&format!("/api/parent-requests/{}/", id), &json!({"status": "rejected"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["status"], "rejected");

    let res = app.delete(&format!("/api/parent-requests/{}/", id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = app.get(&format!("/api/parent-requests/{}/", id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
