use crate::domain::{
    models::message::{Message, NewMessage},
    ports::MessageRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteMessageRepo {
    pool: SqlitePool,
}

impl SqliteMessageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepo {
    async fn create(&self, new: &NewMessage) -> Result<Message, AppError> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, sender_name, sender_role, content, parent_message_id, is_read, created_at)
             VALUES (?, ?, ?, ?, ?, 0, ?)
             RETURNING *",
        )
            .bind(&new.sender_id).bind(&new.sender_name).bind(&new.sender_role)
            .bind(&new.content).bind(new.parent_message_id).bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Message>, AppError> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY created_at ASC, id ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_read(&self, id: i64) -> Result<Message, AppError> {
        sqlx::query_as::<_, Message>("UPDATE messages SET is_read = 1 WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Message non trouvé".into()))
    }
}
