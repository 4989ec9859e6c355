use crate::domain::models::appointment::Appointment;
use crate::domain::models::teacher_request::TeacherRequest;
use crate::domain::ports::EmailAttachment;
use crate::error::AppError;
use base64::{engine::general_purpose, Engine as _};
use tera::Tera;

/// Renders the admin notification for a new teacher application.
pub fn render_teacher_application(templates: &Tera, request: &TeacherRequest) -> Result<(String, String), AppError> {
    let subject = format!("Nouvelle candidature enseignant - {}", request.full_name);

    let mut ctx = tera::Context::new();
    ctx.insert("full_name", &request.full_name);
    ctx.insert("email", &request.email);
    ctx.insert("phone", &request.phone);
    ctx.insert("zone", &request.zone);
    ctx.insert("school", &request.school);
    ctx.insert("qualification", &request.qualification);
    ctx.insert("diplome", &request.diplome);
    ctx.insert("experience", &request.experience);
    ctx.insert("subjects", &request.subjects().join(", "));
    ctx.insert("niveau_accepter", &request.niveau_accepter);
    ctx.insert("format_cours", &request.format_cours);
    ctx.insert("matiere_niveau", &request.matiere_niveau);
    ctx.insert("motivation", &request.motivation);
    let document_names: Vec<String> = request
        .documents()
        .iter()
        .map(|d| format!("{} - {}", d.doc_type, d.name))
        .collect();
    ctx.insert("documents", &document_names);
    ctx.insert("accept_terms", &request.accept_terms);
    ctx.insert("accept_verification", &request.accept_verification);
    ctx.insert("accept_profile_sharing", &request.accept_profile_sharing);
    ctx.insert("request_id", &request.id);
    ctx.insert("submitted_at", &request.created_at.format("%d/%m/%Y à %H:%M").to_string());

    let body = templates
        .render("teacher_application.html", &ctx)
        .map_err(|e| AppError::InternalWithMsg(format!("Tera render error: {:?}", e)))?;

    Ok((subject, body))
}

/// Renders the admin notification for a new appointment booking.
pub fn render_appointment_booked(templates: &Tera, appointment: &Appointment) -> Result<(String, String), AppError> {
    let subject = if appointment.is_trial_course {
        format!("Nouveau cours d'essai - {}", appointment.student_name)
    } else {
        format!("Nouveau rendez-vous - {}", appointment.student_name)
    };

    let mut ctx = tera::Context::new();
    ctx.insert("parent_name", &appointment.parent_name);
    ctx.insert("parent_email", &appointment.parent_email);
    ctx.insert("parent_phone", &appointment.parent_phone);
    ctx.insert("student_name", &appointment.student_name);
    ctx.insert("subject", &appointment.subject);
    ctx.insert("level", &appointment.level);
    ctx.insert("preferred_date", &appointment.preferred_date.format("%d/%m/%Y").to_string());
    ctx.insert("preferred_time", &appointment.preferred_time.format("%H:%M").to_string());
    ctx.insert("duration", &appointment.duration);
    ctx.insert("location", &appointment.location);
    ctx.insert("notes", &appointment.notes);
    ctx.insert("price_per_hour", &appointment.price_per_hour);
    ctx.insert("total_amount", &appointment.total_amount);
    ctx.insert("is_trial_course", &appointment.is_trial_course);

    let body = templates
        .render("appointment_booked.html", &ctx)
        .map_err(|e| AppError::InternalWithMsg(format!("Tera render error: {:?}", e)))?;

    Ok((subject, body))
}

/// CV plus the required documents, decoded for attaching to the admin email.
/// Undecodable entries are skipped; a broken attachment must not sink the
/// whole notification.
pub fn application_attachments(request: &TeacherRequest) -> Vec<EmailAttachment> {
    let mut attachments = Vec::new();

    if !request.cv_file.is_empty() {
        if let Some(data) = decode_base64_payload(&request.cv_file) {
            let filename = if request.cv_filename.is_empty() {
                "cv.pdf".to_string()
            } else {
                request.cv_filename.clone()
            };
            let content_type = guess_content_type(&filename);
            attachments.push(EmailAttachment { filename, content_type, data });
        }
    }

    for doc in request.documents() {
        let Some(file) = doc.file else { continue };
        if let Some(data) = decode_base64_payload(&file) {
            attachments.push(EmailAttachment {
                content_type: guess_content_type(&doc.name),
                filename: doc.name,
                data,
            });
        }
    }

    attachments
}

/// Accepts both raw base64 and `data:<mime>;base64,<payload>` URIs.
pub fn decode_base64_payload(payload: &str) -> Option<Vec<u8>> {
    let raw = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };
    general_purpose::STANDARD.decode(raw.trim()).ok()
}

pub fn guess_content_type(file_name: &str) -> String {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg".to_string()
    } else if lower.ends_with(".png") {
        "image/png".to_string()
    } else if lower.ends_with(".txt") {
        "text/plain".to_string()
    } else {
        "application/pdf".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_strips_data_uri_prefix() {
        let encoded = general_purpose::STANDARD.encode(b"hello");
        let with_prefix = format!("data:application/pdf;base64,{}", encoded);
        assert_eq!(decode_base64_payload(&with_prefix).unwrap(), b"hello");
        assert_eq!(decode_base64_payload(&encoded).unwrap(), b"hello");
        assert!(decode_base64_payload("pas du base64 !!!").is_none());
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("scan.png"), "image/png");
        assert_eq!(guess_content_type("cv.pdf"), "application/pdf");
        assert_eq!(guess_content_type("inconnu"), "application/pdf");
    }
}
