use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::dtos::requests::{AssignTeacherRequest, CreateAppointmentRequest, UpdateStatusRequest};
use crate::api::dtos::responses::AppointmentResponse;
use crate::api::handlers::{required_number, required_text};
use crate::domain::models::appointment::{AppointmentStatus, NewAppointment, LOCATIONS};
use crate::domain::services::notifications;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let parent_id = required_text(payload.parent_id.as_deref(), "parentId")?;
    let parent_name = required_text(payload.parent_name.as_deref(), "parentName")?;
    let parent_email = required_text(payload.parent_email.as_deref(), "parentEmail")?;
    let student_name = required_text(payload.student_name.as_deref(), "studentName")?;
    let subject = required_text(payload.subject.as_deref(), "subject")?;
    let level = required_text(payload.level.as_deref(), "level")?;
    let date_str = required_text(payload.preferred_date.as_deref(), "preferredDate")?;
    let time_str = required_text(payload.preferred_time.as_deref(), "preferredTime")?;
    let location = required_text(payload.location.as_deref(), "location")?;

    let preferred_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Format de date invalide (AAAA-MM-JJ attendu)".into()))?;
    let preferred_time = NaiveTime::parse_from_str(&time_str, "%H:%M")
        .map_err(|_| AppError::Validation("Format d'heure invalide (HH:MM attendu)".into()))?;

    let duration = required_number(payload.duration, "duration")?;
    if !(duration > 0.0) {
        return Err(AppError::Validation("La durée doit être strictement positive".into()));
    }

    let price_per_hour = required_number(payload.price_per_hour, "pricePerHour")?;
    let total_amount = required_number(payload.total_amount, "totalAmount")?;
    if price_per_hour < 0.0 || total_amount < 0.0 {
        return Err(AppError::Validation("Le tarif ne peut pas être négatif".into()));
    }

    if !LOCATIONS.contains(&location.as_str()) {
        return Err(AppError::Validation("Lieu invalide. Valeurs acceptées: online, home".into()));
    }

    let new = NewAppointment {
        parent_id,
        parent_name,
        parent_email,
        parent_phone: payload.parent_phone.unwrap_or_default(),
        student_name,
        subject,
        level,
        preferred_date,
        preferred_time,
        duration,
        location,
        notes: payload.notes.unwrap_or_default(),
        price_per_hour,
        total_amount,
        is_trial_course: payload.is_trial_course.unwrap_or(false),
    };

    // The repository rejects a second trial for the same parent before
    // anything is persisted.
    let created = state.appointment_repo.create(&new).await?;
    info!("Appointment created: {} ({} - {})", created.id, created.student_name, created.subject);

    let message = if created.is_trial_course {
        "Cours d'essai réservé avec succès !"
    } else {
        "Rendez-vous créé avec succès"
    };

    // Notification failures never fail the booking; they surface as a flag.
    let email_sent = match notifications::render_appointment_booked(&state.templates, &created) {
        Ok((subject, body)) => match state
            .email_service
            .send(&state.config.admin_email, &subject, &body, &[])
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Admin notification email failed: {}", e);
                false
            }
        },
        Err(e) => {
            warn!("Admin notification render failed: {}", e);
            false
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": message,
            "emailSent": email_sent,
            "data": AppointmentResponse::from(created),
        })),
    ))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = state.appointment_repo.list().await?;
    let data: Vec<AppointmentResponse> = appointments.into_iter().map(AppointmentResponse::from).collect();
    Ok(Json(json!({
        "success": true,
        "count": data.len(),
        "data": data,
    })))
}

pub async fn list_parent_appointments(
    State(state): State<Arc<AppState>>,
    Path(parent_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = state.appointment_repo.list_by_parent(&parent_id).await?;
    let data: Vec<AppointmentResponse> = appointments.into_iter().map(AppointmentResponse::from).collect();
    Ok(Json(json!({
        "success": true,
        "count": data.len(),
        "data": data,
    })))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Rendez-vous non trouvé".into()))?;
    Ok(Json(json!({
        "success": true,
        "data": AppointmentResponse::from(appointment),
    })))
}

pub async fn check_trial(
    State(state): State<Arc<AppState>>,
    Path(parent_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let has_used_trial = state.appointment_repo.has_used_trial(&parent_id).await?;
    Ok(Json(json!({
        "success": true,
        "hasUsedTrial": has_used_trial,
    })))
}

pub async fn assign_teacher(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignTeacherRequest>,
) -> Result<impl IntoResponse, AppError> {
    let teacher_id = payload.teacher_id.as_deref().map(str::trim).unwrap_or("");
    let teacher_name = payload.teacher_name.as_deref().map(str::trim).unwrap_or("");
    if teacher_id.is_empty() || teacher_name.is_empty() {
        return Err(AppError::Validation("teacherId et teacherName sont requis".into()));
    }

    let mut appointment = state.appointment_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Rendez-vous non trouvé".into()))?;

    // Re-assignment overwrites silently; no history is kept.
    appointment.assigned_teacher_id = Some(teacher_id.to_string());
    appointment.assigned_teacher = Some(teacher_name.to_string());
    appointment.status = AppointmentStatus::Assigned.as_str().to_string();
    appointment.updated_at = Utc::now();

    let updated = state.appointment_repo.update(&appointment).await?;
    info!("Teacher {} assigned to appointment {}", teacher_id, updated.id);

    Ok(Json(json!({
        "success": true,
        "message": "Enseignant assigné avec succès",
        "data": AppointmentResponse::from(updated),
    })))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Membership check only; the loose transition graph is deliberate.
    let status = payload
        .status
        .as_deref()
        .and_then(AppointmentStatus::parse)
        .ok_or(AppError::Validation(
            "Statut invalide. Valeurs acceptées: pending, assigned, confirmed, completed, cancelled".into(),
        ))?;

    // Status-only write; a concurrent assignment must not be clobbered.
    let updated = state.appointment_repo.update_status(id, status.as_str()).await?;
    info!("Appointment {} status -> {}", updated.id, updated.status);

    Ok(Json(json!({
        "success": true,
        "message": "Statut mis à jour avec succès",
        "data": AppointmentResponse::from(updated),
    })))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.appointment_repo.delete(id).await?;
    info!("Appointment deleted: {}", id);
    Ok(Json(json!({
        "success": true,
        "message": "Rendez-vous supprimé avec succès",
    })))
}
