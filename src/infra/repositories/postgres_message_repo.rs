use crate::domain::{
    models::message::{Message, NewMessage},
    ports::MessageRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresMessageRepo {
    pool: PgPool,
}

impl PostgresMessageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepo {
    async fn create(&self, new: &NewMessage) -> Result<Message, AppError> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_id, sender_name, sender_role, content, parent_message_id, is_read, created_at)
             VALUES ($1, $2, $3, $4, $5, FALSE, $6)
             RETURNING *",
        )
            .bind(&new.sender_id).bind(&new.sender_name).bind(&new.sender_role)
            .bind(&new.content).bind(new.parent_message_id).bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Message>, AppError> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY created_at ASC, id ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_read(&self, id: i64) -> Result<Message, AppError> {
        sqlx::query_as::<_, Message>("UPDATE messages SET is_read = TRUE WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Message non trouvé".into()))
    }
}
