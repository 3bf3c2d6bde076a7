use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::{self, Role};
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::response::{self, SubmissionError, SubmissionRequest};
use crate::models::form;

/// Translate a tagged submission failure to its boundary status. Every
/// known condition gets its own status and message; only genuine database
/// faults fall through to 500.
fn map_submission_error(e: SubmissionError) -> AppError {
    match e {
        SubmissionError::StudentNotFound => AppError::NotFound,
        SubmissionError::FormNotFound => AppError::NotFound,
        SubmissionError::NotAuthorized => {
            AppError::Forbidden("You are not part of this form's cohort".to_string())
        }
        SubmissionError::DuplicateSubmission => {
            AppError::Conflict("Feedback for this form has already been submitted".to_string())
        }
        SubmissionError::UnknownQuestion(id) => {
            AppError::Validation(format!("Unknown question id {id}"))
        }
        SubmissionError::Db(e) => AppError::Db(e),
    }
}

/// POST /api/v1/forms/{id}/responses — submit feedback as the calling
/// student. 201 on success; 409 when a submission already exists.
pub async fn submit(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<SubmissionRequest>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    let student = ident.require_student()?;

    let form_id = path.into_inner();
    let response_id = response::submit(&pool, form_id, student.id, &body)
        .await
        .map_err(map_submission_error)?;

    let submitted = response::find_by_id(&pool, response_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(submitted))
}

/// GET /api/v1/forms/{id}/responses — all submissions for a form. Admins
/// see any form; faculty only their own.
pub async fn list_for_form(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_staff()?;

    let form_id = path.into_inner();
    let f = form::find_by_id(&pool, form_id).await?.ok_or(AppError::NotFound)?;

    if ident.role == Role::Faculty && !f.faculty_email.eq_ignore_ascii_case(&ident.email) {
        return Err(AppError::Forbidden(
            "Faculty may only view responses to their own forms".to_string(),
        ));
    }

    let responses = response::find_by_form(&pool, form_id).await?;
    Ok(HttpResponse::Ok().json(responses))
}

/// DELETE /api/v1/responses/{id} — admin cleanup; items cascade.
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    response::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
