use crate::domain::{
    models::teacher_request::{NewTeacherRequest, RequestStats, TeacherRequest},
    ports::TeacherRequestRepository,
};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

pub struct SqliteTeacherRequestRepo {
    pool: SqlitePool,
}

impl SqliteTeacherRequestRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeacherRequestRepository for SqliteTeacherRequestRepo {
    async fn create(&self, new: &NewTeacherRequest) -> Result<TeacherRequest, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, TeacherRequest>(
            "INSERT INTO teacher_requests (full_name, email, phone, password_hash, zone, school, diplome, qualification, experience, niveau_accepter, format_cours, matiere_niveau, subjects_json, availability, motivation, cv_file, cv_filename, documents_json, accept_terms, accept_verification, accept_profile_sharing, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)
             RETURNING *",
        )
            .bind(&new.full_name).bind(&new.email).bind(&new.phone).bind(&new.password_hash)
            .bind(&new.zone).bind(&new.school).bind(&new.diplome).bind(&new.qualification)
            .bind(&new.experience).bind(&new.niveau_accepter).bind(&new.format_cours).bind(&new.matiere_niveau)
            .bind(&new.subjects_json).bind(&new.availability).bind(&new.motivation)
            .bind(&new.cv_file).bind(&new.cv_filename).bind(&new.documents_json)
            .bind(new.accept_terms).bind(new.accept_verification).bind(new.accept_profile_sharing)
            .bind(now).bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateEmail("Une candidature avec cet email existe déjà".into())
                } else {
                    AppError::Database(e)
                }
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TeacherRequest>, AppError> {
        sqlx::query_as::<_, TeacherRequest>("SELECT * FROM teacher_requests WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<TeacherRequest>, AppError> {
        sqlx::query_as::<_, TeacherRequest>("SELECT * FROM teacher_requests WHERE LOWER(email) = LOWER(?)").bind(email).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<TeacherRequest>, AppError> {
        sqlx::query_as::<_, TeacherRequest>("SELECT * FROM teacher_requests ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<TeacherRequest, AppError> {
        sqlx::query_as::<_, TeacherRequest>("UPDATE teacher_requests SET status = ?, updated_at = ? WHERE id = ? RETURNING *")
            .bind(status).bind(Utc::now()).bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Candidature non trouvée".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teacher_requests WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Candidature non trouvée".into()));
        }
        Ok(())
    }

    async fn stats(&self) -> Result<RequestStats, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as total,
                    COALESCE(SUM(status = 'pending'), 0) as pending,
                    COALESCE(SUM(status = 'approved'), 0) as approved,
                    COALESCE(SUM(status = 'rejected'), 0) as rejected
             FROM teacher_requests",
        )
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(RequestStats {
            total: row.get("total"),
            pending: row.get("pending"),
            approved: row.get("approved"),
            rejected: row.get("rejected"),
        })
    }

    async fn recent(&self, limit: i64) -> Result<Vec<TeacherRequest>, AppError> {
        sqlx::query_as::<_, TeacherRequest>("SELECT * FROM teacher_requests ORDER BY created_at DESC LIMIT ?").bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
