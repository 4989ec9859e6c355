use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ParentRequest {
    pub id: i64,
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password_hash: String,
    pub child_name: String,
    pub child_age: i32,
    pub child_level: String,
    pub subjects_json: String,
    pub availability: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParentRequest {
    pub fn subjects(&self) -> Vec<String> {
        serde_json::from_str(&self.subjects_json).unwrap_or_default()
    }
}

pub struct NewParentRequest {
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password_hash: String,
    pub child_name: String,
    pub child_age: i32,
    pub child_level: String,
    pub subjects_json: String,
    pub availability: String,
}
