use crate::domain::{
    models::appointment::{Appointment, NewAppointment},
    ports::AppointmentRepository,
};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepo {
    async fn create(&self, new: &NewAppointment) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if new.is_trial_course && !new.parent_id.is_empty() {
            let row = sqlx::query("SELECT COUNT(*) as count FROM appointments WHERE parent_id = $1 AND is_trial_course")
                .bind(&new.parent_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            if row.get::<i64, _>("count") > 0 {
                return Err(AppError::TrialAlreadyUsed);
            }
        }

        let now = Utc::now();
        let created = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (parent_id, parent_name, parent_email, parent_phone, student_name, subject, level, preferred_date, preferred_time, duration, location, notes, price_per_hour, total_amount, is_trial_course, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, 'pending', $16, $17)
             RETURNING *",
        )
            .bind(&new.parent_id).bind(&new.parent_name).bind(&new.parent_email).bind(&new.parent_phone)
            .bind(&new.student_name).bind(&new.subject).bind(&new.level)
            .bind(new.preferred_date).bind(new.preferred_time).bind(new.duration)
            .bind(&new.location).bind(&new.notes).bind(new.price_per_hour).bind(new.total_amount)
            .bind(new.is_trial_course).bind(now).bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| if is_unique_violation(&e) { AppError::TrialAlreadyUsed } else { AppError::Database(e) })?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_parent(&self, parent_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE parent_id = $1 ORDER BY created_at DESC")
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn has_used_trial(&self, parent_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM appointments WHERE parent_id = $1 AND is_trial_course")
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    async fn update(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET assigned_teacher_id=$1, assigned_teacher=$2, status=$3, updated_at=$4 WHERE id=$5 RETURNING *",
        )
            .bind(&appointment.assigned_teacher_id).bind(&appointment.assigned_teacher)
            .bind(&appointment.status).bind(appointment.updated_at).bind(appointment.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Rendez-vous non trouvé".into()))
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status=$1, updated_at=$2 WHERE id=$3 RETURNING *",
        )
            .bind(status).bind(Utc::now()).bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Rendez-vous non trouvé".into()))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        sqlx::query("DELETE FROM course_files WHERE appointment_id = $1").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1").bind(id).execute(&mut *tx).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Rendez-vous non trouvé".into()));
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
