use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateMessageRequest;
use crate::api::dtos::responses::MessageResponse;
use crate::api::handlers::required_text;
use crate::domain::models::message::{Message, NewMessage};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let sender_id = required_text(payload.sender_id.as_deref(), "senderId")?;
    let sender_name = required_text(payload.sender_name.as_deref(), "senderName")?;
    let sender_role = required_text(payload.sender_role.as_deref(), "senderRole")?;
    let content = required_text(payload.content.as_deref(), "content")?;

    if let Some(parent_id) = payload.parent_message_id {
        let parent = state.message_repo.find_by_id(parent_id).await?
            .ok_or(AppError::NotFound("Message non trouvé".into()))?;
        // Replies only attach to top-level messages, one level deep.
        if parent.parent_message_id.is_some() {
            return Err(AppError::Validation(
                "Impossible de répondre à une réponse".into(),
            ));
        }
    }

    let new = NewMessage {
        sender_id,
        sender_name,
        sender_role,
        content,
        parent_message_id: payload.parent_message_id,
    };

    let created = state.message_repo.create(&new).await?;
    info!("Message posted: {} by {}", created.id, created.sender_name);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Message envoyé avec succès",
            "data": MessageResponse::from(created),
        })),
    ))
}

pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let messages = state.message_repo.list().await?;
    let data = build_threads(messages);
    Ok(Json(json!({
        "success": true,
        "count": data.len(),
        "data": data,
    })))
}

pub async fn mark_message_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.message_repo.mark_read(id).await?;
    Ok(Json(json!({
        "success": true,
        "data": MessageResponse::from(updated),
    })))
}

/// Groups a flat, chronologically ordered list into top-level messages with
/// their replies nested underneath.
fn build_threads(messages: Vec<Message>) -> Vec<MessageResponse> {
    let (tops, replies): (Vec<Message>, Vec<Message>) = messages
        .into_iter()
        .partition(|m| m.parent_message_id.is_none());

    let mut threads: Vec<MessageResponse> = tops.into_iter().map(MessageResponse::from).collect();
    for reply in replies {
        let parent_id = reply.parent_message_id;
        if let Some(parent) = threads.iter_mut().find(|t| Some(t.id) == parent_id) {
            parent.replies.push(MessageResponse::from(reply));
        }
    }
    threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn msg(id: i64, parent: Option<i64>) -> Message {
        Message {
            id,
            sender_id: "u1".into(),
            sender_name: "Test".into(),
            sender_role: "parent".into(),
            content: "bonjour".into(),
            parent_message_id: parent,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_replies_nest_under_their_parent() {
        let threads = build_threads(vec![msg(1, None), msg(2, Some(1)), msg(3, None), msg(4, Some(1))]);
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].replies.len(), 2);
        assert!(threads[1].replies.is_empty());
    }

    #[test]
    fn test_orphan_reply_is_dropped_from_listing() {
        let threads = build_threads(vec![msg(1, None), msg(2, Some(99))]);
        assert_eq!(threads.len(), 1);
        assert!(threads[0].replies.is_empty());
    }
}
