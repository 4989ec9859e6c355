use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::api::dtos::requests::{CreateTeacherRequestPayload, LoginRequest, UpdateStatusRequest};
use crate::api::dtos::responses::TeacherRequestResponse;
use crate::domain::models::teacher_request::{NewTeacherRequest, REQUEST_STATUSES, REQUIRED_DOCUMENTS};
use crate::domain::services::notifications::{
    application_attachments, decode_base64_payload, guess_content_type, render_teacher_application,
};
use crate::domain::services::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_teacher_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTeacherRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::Validation("Email requis".into()));
    }

    if state.teacher_request_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateEmail(
            "Une candidature avec cet email existe déjà".into(),
        ));
    }

    let required: [(&Option<String>, &str); 9] = [
        (&payload.full_name, "Nom complet"),
        (&payload.phone, "Téléphone"),
        (&payload.password, "Mot de passe"),
        (&payload.zone, "Zone d'enseignement"),
        (&payload.qualification, "Diplôme"),
        (&payload.experience, "Expérience"),
        (&payload.matiere_niveau, "Matières"),
        (&payload.motivation, "Lettre de motivation"),
        (&payload.cv_file, "CV"),
    ];
    for (value, label) in required {
        if value.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            return Err(AppError::Validation(format!(
                "Le champ \"{label}\" est obligatoire"
            )));
        }
    }

    if !payload.accept_terms.unwrap_or(false) {
        return Err(AppError::Validation(
            "Vous devez accepter les Conditions Générales d'Utilisation".into(),
        ));
    }

    let documents = payload.documents.unwrap_or_default();
    if documents.is_empty() {
        return Err(AppError::Validation(
            "Vous devez télécharger au moins un document obligatoire".into(),
        ));
    }
    let missing: Vec<&str> = REQUIRED_DOCUMENTS
        .iter()
        .copied()
        .filter(|required_doc| !documents.iter().any(|d| d.doc_type == *required_doc))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Documents manquants: {}",
            missing.join(", ")
        )));
    }

    let password_hash = hash_password(payload.password.as_deref().unwrap_or_default())?;

    let matiere_niveau = payload.matiere_niveau.unwrap_or_default();
    // The form sends either a subjects array or a comma-joined string.
    let subjects: Vec<String> = match payload.subjects {
        Some(list) if !list.is_empty() => list,
        _ => matiere_niveau
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    };

    let new = NewTeacherRequest {
        full_name: payload.full_name.unwrap_or_default().trim().to_string(),
        email,
        phone: payload.phone.unwrap_or_default().trim().to_string(),
        password_hash,
        zone: payload.zone.unwrap_or_default(),
        school: payload.school.unwrap_or_default(),
        diplome: payload.diplome.unwrap_or_default(),
        qualification: payload.qualification.unwrap_or_default(),
        experience: payload.experience.unwrap_or_default(),
        niveau_accepter: payload.niveau_accepter.unwrap_or_default(),
        format_cours: payload.format_cours.unwrap_or_default(),
        matiere_niveau,
        subjects_json: serde_json::to_string(&subjects).unwrap_or_else(|_| "[]".into()),
        availability: payload.availability.unwrap_or_default(),
        motivation: payload.motivation.unwrap_or_default(),
        cv_file: payload.cv_file.unwrap_or_default(),
        cv_filename: payload.cv_file_name.unwrap_or_default(),
        documents_json: serde_json::to_string(&documents).unwrap_or_else(|_| "[]".into()),
        accept_terms: payload.accept_terms.unwrap_or(false),
        accept_verification: payload.accept_verification.unwrap_or(false),
        accept_profile_sharing: payload.accept_profile_sharing.unwrap_or(false),
    };

    let created = state.teacher_request_repo.create(&new).await?;
    info!("Teacher application received: {} ({})", created.full_name, created.email);

    // Notify the admin team. A mail outage must never lose an application.
    let email_sent = match render_teacher_application(&state.templates, &created) {
        Ok((subject, body)) => {
            let attachments = application_attachments(&created);
            match state
                .email_service
                .send(&state.config.admin_email, &subject, &body, &attachments)
                .await
            {
                Ok(()) => true,
                Err(e) => {
                    error!("Failed to send application notification: {e}");
                    false
                }
            }
        }
        Err(e) => {
            warn!("Failed to render application notification: {e}");
            false
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Candidature enregistrée avec succès. Vous recevrez une notification par email sous 48-72h.",
            "data": {
                "id": created.id,
                "fullName": created.full_name,
                "email": created.email,
                "status": created.status,
                "documentsCount": created.documents().len(),
                "createdAt": created.created_at,
                "emailSent": email_sent,
            },
        })),
    ))
}

pub async fn list_teacher_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let requests = state.teacher_request_repo.list().await?;
    let stats = state.teacher_request_repo.stats().await?;
    let data: Vec<TeacherRequestResponse> =
        requests.into_iter().map(TeacherRequestResponse::from).collect();
    Ok(Json(json!({
        "success": true,
        "data": data,
        "stats": stats,
    })))
}

pub async fn get_teacher_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.teacher_request_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Candidature non trouvée".into()))?;
    Ok(Json(json!({
        "success": true,
        "data": TeacherRequestResponse::from(request),
    })))
}

pub async fn update_teacher_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = payload.status.unwrap_or_default();
    if !REQUEST_STATUSES.contains(&status.as_str()) {
        return Err(AppError::Validation(
            "Statut invalide. Valeurs acceptées: pending, approved, rejected".into(),
        ));
    }

    let updated = state.teacher_request_repo.update_status(id, &status).await?;
    info!("Teacher application {} moved to {}", id, status);
    Ok(Json(json!({
        "success": true,
        "message": format!("Statut mis à jour: {status}"),
        "data": TeacherRequestResponse::from(updated),
    })))
}

pub async fn delete_teacher_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.teacher_request_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Candidature non trouvée".into()))?;
    state.teacher_request_repo.delete(id).await?;
    info!("Teacher application deleted: {}", id);
    Ok(Json(json!({
        "success": true,
        "message": format!("Candidature de {} supprimée avec succès", request.full_name),
    })))
}

pub async fn download_cv(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let request = state.teacher_request_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Candidature non trouvée".into()))?;

    if request.cv_file.is_empty() {
        return Err(AppError::NotFound("CV non trouvé".into()));
    }
    let data = decode_base64_payload(&request.cv_file)
        .ok_or(AppError::InternalWithMsg("CV illisible".into()))?;

    let filename = if request.cv_filename.is_empty() {
        "cv.pdf".to_string()
    } else {
        request.cv_filename.clone()
    };

    let headers = [
        (header::CONTENT_TYPE, guess_content_type(&filename)),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, data).into_response())
}

pub async fn login_teacher(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Email et mot de passe requis".into()));
    }

    let request = state.teacher_request_repo.find_by_email(&email).await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&password, &request.password_hash) {
        return Err(AppError::Unauthorized);
    }

    match request.status.as_str() {
        "approved" => {}
        "rejected" => {
            return Err(AppError::Forbidden(
                "Votre candidature a été rejetée. Contactez l'administration.".into(),
            ))
        }
        _ => {
            return Err(AppError::Forbidden(
                "Votre candidature est en cours de vérification. Vous serez notifié par email sous 48-72h.".into(),
            ))
        }
    }

    info!("Teacher login: {}", request.email);
    let mut data = serde_json::to_value(TeacherRequestResponse::from(request))
        .map_err(|_| AppError::Internal)?;
    data["role"] = json!("teacher");

    Ok(Json(json!({
        "success": true,
        "message": "Connexion réussie",
        "data": data,
    })))
}

pub async fn teacher_request_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.teacher_request_repo.stats().await?;
    let recent = state.teacher_request_repo.recent(5).await?;
    let recent: Vec<TeacherRequestResponse> =
        recent.into_iter().map(TeacherRequestResponse::from).collect();
    Ok(Json(json!({
        "success": true,
        "stats": stats,
        "recent": recent,
    })))
}
