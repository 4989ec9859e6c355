mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

fn message_payload(content: &str) -> Value {
    json!({
        "senderId": "parent-1",
        "senderName": "Marie Dupont",
        "senderRole": "parent",
        "content": content
    })
}

#[tokio::test]
async fn test_post_and_list_messages() {
    let app = TestApp::new().await;

    let res = app.post_json("/api/messages/", &message_payload("Bonjour, une question sur le planning")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["isRead"], false);
    assert!(body["data"]["parentMessageId"].is_null());

    let res = app.get("/api/messages/").await;
    let body = parse_body(res).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = TestApp::new().await;

    let res = app
        .post_json("/api/messages/", &json!({"senderId": "p1", "senderName": "X", "senderRole": "parent"}))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .post_json("/api/messages/", &json!({"senderName": "X", "senderRole": "parent", "content": "hello"}))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replies_nest_one_level() {
    let app = TestApp::new().await;

    let res = app.post_json("/api/messages/", &message_payload("Question initiale")).await;
    let top_id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    let mut reply = message_payload("Réponse de l'admin");
    reply["senderId"] = json!("admin-1");
    reply["senderRole"] = json!("admin");
    reply["parentMessageId"] = json!(top_id);
    let res = app.post_json("/api/messages/", &reply).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let reply_id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    // A reply to a reply is refused.
    let mut nested = message_payload("Re-re");
    nested["parentMessageId"] = json!(reply_id);
    let res = app.post_json("/api/messages/", &nested).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Replying to a message that does not exist is a 404.
    let mut orphan = message_payload("Perdu");
    orphan["parentMessageId"] = json!(99999);
    let res = app.post_json("/api/messages/", &orphan).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The listing groups the reply under its parent.
    let res = app.get("/api/messages/").await;
    let body = parse_body(res).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], top_id);
    let replies = body["data"][0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], reply_id);
    assert_eq!(replies[0]["senderRole"], "admin");
}

#[tokio::test]
async fn test_mark_read() {
    let app = TestApp::new().await;

    let res = app.post_json("/api/messages/", &message_payload("À lire")).await;
    let id = parse_body(res).await["data"]["id"].as_i64().unwrap();

    let res = app.put_json(&format!("/api/messages/{}/read/", id), &json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["isRead"], true);

    let res = app.put_json("/api/messages/99999/read/", &json!({})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
