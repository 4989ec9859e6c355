use crate::domain::{
    models::parent_request::{NewParentRequest, ParentRequest},
    ports::ParentRequestRepository,
};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresParentRequestRepo {
    pool: PgPool,
}

impl PostgresParentRequestRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParentRequestRepository for PostgresParentRequestRepo {
    async fn create(&self, new: &NewParentRequest) -> Result<ParentRequest, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, ParentRequest>(
            "INSERT INTO parent_requests (parent_name, email, phone, address, password_hash, child_name, child_age, child_level, subjects_json, availability, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', $11, $12)
             RETURNING *",
        )
            .bind(&new.parent_name).bind(&new.email).bind(&new.phone).bind(&new.address)
            .bind(&new.password_hash).bind(&new.child_name).bind(new.child_age).bind(&new.child_level)
            .bind(&new.subjects_json).bind(&new.availability)
            .bind(now).bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateEmail("Une demande avec cet email existe déjà".into())
                } else {
                    AppError::Database(e)
                }
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ParentRequest>, AppError> {
        sqlx::query_as::<_, ParentRequest>("SELECT * FROM parent_requests WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ParentRequest>, AppError> {
        sqlx::query_as::<_, ParentRequest>("SELECT * FROM parent_requests WHERE LOWER(email) = LOWER($1)").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<ParentRequest>, AppError> {
        sqlx::query_as::<_, ParentRequest>("SELECT * FROM parent_requests ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<ParentRequest, AppError> {
        sqlx::query_as::<_, ParentRequest>("UPDATE parent_requests SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *")
            .bind(status).bind(Utc::now()).bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Demande non trouvée".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM parent_requests WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Demande non trouvée".into()));
        }
        Ok(())
    }
}
