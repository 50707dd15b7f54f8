use actix_web::{web, HttpResponse, Responder};

use crate::db::AppState;

use super::models::ContactFormData;

/// Contact submission entry point.
///
/// Runs the full pipeline; validation failures answer 400 with field errors,
/// a failed insert answers 500 with a generic message. Document and email
/// problems never surface here beyond a missing document link.
#[utoipa::path(
    context_path = "/api",
    tag = "Contact",
    post,
    path = "/contact",
    request_body = ContactFormData,
    responses(
        (status = 200, description = "Submission accepted", body = crate::contact::models::SubmissionOutcome),
        (status = 400, description = "Validation failed", body = crate::contact::models::SubmissionOutcome),
        (status = 500, description = "Submission could not be stored", body = crate::contact::models::SubmissionOutcome)
    )
)]
pub async fn submit_contact(
    req: web::Json<ContactFormData>,
    data: web::Data<AppState>,
) -> impl Responder {
    let outcome = data.contact.submit(req.into_inner()).await;

    if outcome.success {
        HttpResponse::Ok().json(outcome)
    } else if outcome.errors.is_some() {
        HttpResponse::BadRequest().json(outcome)
    } else {
        HttpResponse::InternalServerError().json(outcome)
    }
}
