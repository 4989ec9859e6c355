use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Flat thread record. `parent_message_id` allows exactly one level of
/// nesting: a reply always points at a top-level message.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Message {
    pub id: i64,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_role: String,
    pub content: String,
    pub parent_message_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewMessage {
    pub sender_id: String,
    pub sender_name: String,
    pub sender_role: String,
    pub content: String,
    pub parent_message_id: Option<i64>,
}
