use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::UploadCourseFileRequest;
use crate::api::dtos::responses::CourseFileResponse;
use crate::api::handlers::required_text;
use crate::domain::models::course_file::{extension_allowed, NewCourseFile, MAX_FILE_BYTES};
use crate::domain::services::notifications::{decode_base64_payload, guess_content_type};
use crate::error::AppError;
use crate::state::AppState;

pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
    Json(payload): Json<UploadCourseFileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let file_name = required_text(payload.file_name.as_deref(), "fileName")?;
    let encoded = required_text(payload.data.as_deref(), "data")?;

    if !extension_allowed(&file_name) {
        return Err(AppError::Validation(
            "Type de fichier non autorisé (pdf, doc, docx, jpg, jpeg, png, txt)".into(),
        ));
    }

    let data = decode_base64_payload(&encoded)
        .ok_or(AppError::Validation("Contenu base64 invalide".into()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Le fichier est vide".into()));
    }
    if data.len() > MAX_FILE_BYTES {
        return Err(AppError::Validation("Le fichier dépasse la taille maximale de 20 Mo".into()));
    }

    // The appointment must exist before anything is written.
    state.appointment_repo.find_by_id(appointment_id).await?
        .ok_or(AppError::NotFound("Rendez-vous non trouvé".into()))?;

    let content_type = payload
        .content_type
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| guess_content_type(&file_name));

    let new = NewCourseFile {
        appointment_id,
        file_name,
        content_type,
        data,
        uploaded_by: payload.uploaded_by.unwrap_or_default(),
    };

    let created = state.course_file_repo.create(&new).await?;
    info!("Course file uploaded: {} for appointment {}", created.id, appointment_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Fichier enregistré avec succès",
            "data": CourseFileResponse::from(created),
        })),
    ))
}

pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.appointment_repo.find_by_id(appointment_id).await?
        .ok_or(AppError::NotFound("Rendez-vous non trouvé".into()))?;

    let files = state.course_file_repo.list_by_appointment(appointment_id).await?;
    let data: Vec<CourseFileResponse> = files.into_iter().map(CourseFileResponse::from).collect();
    Ok(Json(json!({
        "success": true,
        "count": data.len(),
        "data": data,
    })))
}

pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let file = state.course_file_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Fichier non trouvé".into()))?;

    let headers = [
        (header::CONTENT_TYPE, file.content_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];

    Ok((headers, file.data).into_response())
}

pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.course_file_repo.delete(id).await?;
    info!("Course file deleted: {}", id);
    Ok(Json(json!({
        "success": true,
        "message": "Fichier supprimé avec succès",
    })))
}
