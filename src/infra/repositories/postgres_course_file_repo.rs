use crate::domain::{
    models::course_file::{CourseFile, CourseFileMeta, NewCourseFile},
    ports::CourseFileRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

const META_COLUMNS: &str = "id, appointment_id, file_name, content_type, size_bytes, uploaded_by, created_at";

pub struct PostgresCourseFileRepo {
    pool: PgPool,
}

impl PostgresCourseFileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseFileRepository for PostgresCourseFileRepo {
    async fn create(&self, new: &NewCourseFile) -> Result<CourseFileMeta, AppError> {
        let sql = format!(
            "INSERT INTO course_files (appointment_id, file_name, content_type, size_bytes, data, uploaded_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {META_COLUMNS}"
        );
        sqlx::query_as::<_, CourseFileMeta>(&sql)
            .bind(new.appointment_id).bind(&new.file_name).bind(&new.content_type)
            .bind(new.data.len() as i64).bind(&new.data).bind(&new.uploaded_by).bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseFile>, AppError> {
        sqlx::query_as::<_, CourseFile>("SELECT * FROM course_files WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_appointment(&self, appointment_id: i64) -> Result<Vec<CourseFileMeta>, AppError> {
        let sql = format!("SELECT {META_COLUMNS} FROM course_files WHERE appointment_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, CourseFileMeta>(&sql).bind(appointment_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM course_files WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fichier non trouvé".into()));
        }
        Ok(())
    }
}
