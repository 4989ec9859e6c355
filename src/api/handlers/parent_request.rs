use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateParentRequestPayload, LoginRequest, UpdateStatusRequest};
use crate::api::dtos::responses::ParentRequestResponse;
use crate::domain::models::parent_request::NewParentRequest;
use crate::domain::models::teacher_request::REQUEST_STATUSES;
use crate::domain::services::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_parent_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateParentRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::Validation("Email requis".into()));
    }

    if state.parent_request_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateEmail(
            "Une demande avec cet email existe déjà".into(),
        ));
    }

    let required: [(&Option<String>, &str); 5] = [
        (&payload.parent_name, "Nom du parent"),
        (&payload.phone, "Téléphone"),
        (&payload.address, "Adresse"),
        (&payload.password, "Mot de passe"),
        (&payload.child_name, "Nom de l'enfant"),
    ];
    for (value, label) in required {
        if value.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            return Err(AppError::Validation(format!(
                "Le champ \"{label}\" est obligatoire"
            )));
        }
    }
    let child_age = payload
        .child_age
        .ok_or_else(|| AppError::Validation("Le champ \"Âge de l'enfant\" est obligatoire".into()))?;
    if !(1..=25).contains(&child_age) {
        return Err(AppError::Validation("Âge de l'enfant invalide".into()));
    }
    let child_level = payload
        .child_level
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if child_level.is_empty() {
        return Err(AppError::Validation(
            "Le champ \"Niveau de l'enfant\" est obligatoire".into(),
        ));
    }

    let password_hash = hash_password(payload.password.as_deref().unwrap_or_default())?;

    let new = NewParentRequest {
        parent_name: payload.parent_name.unwrap_or_default().trim().to_string(),
        email,
        phone: payload.phone.unwrap_or_default().trim().to_string(),
        address: payload.address.unwrap_or_default(),
        password_hash,
        child_name: payload.child_name.unwrap_or_default().trim().to_string(),
        child_age,
        child_level: child_level.to_string(),
        subjects_json: serde_json::to_string(&payload.subjects.unwrap_or_default())
            .unwrap_or_else(|_| "[]".into()),
        availability: payload.availability.unwrap_or_default(),
    };

    let created = state.parent_request_repo.create(&new).await?;
    info!("Parent request received: {} ({})", created.parent_name, created.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Demande enregistrée avec succès. Vous recevrez une notification par email sous 48-72h.",
            "data": ParentRequestResponse::from(created),
        })),
    ))
}

pub async fn list_parent_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let requests = state.parent_request_repo.list().await?;
    let data: Vec<ParentRequestResponse> =
        requests.into_iter().map(ParentRequestResponse::from).collect();
    Ok(Json(json!({
        "success": true,
        "count": data.len(),
        "data": data,
    })))
}

pub async fn get_parent_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.parent_request_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Demande non trouvée".into()))?;
    Ok(Json(json!({
        "success": true,
        "data": ParentRequestResponse::from(request),
    })))
}

pub async fn update_parent_request(
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

    let updated = state.parent_request_repo.update_status(id, &status).await?;
    info!("Parent request {} moved to {}", id, status);
    Ok(Json(json!({
        "success": true,
        "message": format!("Statut mis à jour: {status}"),
        "data": ParentRequestResponse::from(updated),
    })))
}

pub async fn delete_parent_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let request = state.parent_request_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Demande non trouvée".into()))?;
    state.parent_request_repo.delete(id).await?;
    info!("Parent request deleted: {}", id);
    Ok(Json(json!({
        "success": true,
        "message": format!("Demande de {} supprimée avec succès", request.parent_name),
    })))
}

pub async fn login_parent(
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

    let request = state.parent_request_repo.find_by_email(&email).await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&password, &request.password_hash) {
        return Err(AppError::Unauthorized);
    }

    match request.status.as_str() {
        "approved" => {}
        "rejected" => {
            return Err(AppError::Forbidden(
                "Votre demande a été rejetée. Contactez l'administration.".into(),
            ))
        }
        _ => {
            return Err(AppError::Forbidden(
                "Votre demande est en cours de vérification. Vous serez notifié par email sous 48-72h.".into(),
            ))
        }
    }

    info!("Parent login: {}", request.email);
    let mut data = serde_json::to_value(ParentRequestResponse::from(request))
        .map_err(|_| AppError::Internal)?;
    data["role"] = json!("parent");

    Ok(Json(json!({
        "success": true,
        "message": "Connexion réussie",
        "data": data,
    })))
}
