use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::{self, Role};
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::form::{self, FormFilter, GenerateRequest, NewForm};
use crate::models::response;

/// GET /api/v1/forms — admins and faculty see everything (with optional
/// filters); a student sees only the active forms of their own cohort,
/// each annotated with whether they already submitted.
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    query: web::Query<FormFilter>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;

    match ident.role {
        Role::Admin | Role::Faculty => {
            let forms = form::find_all(&pool, &query).await?;
            Ok(HttpResponse::Ok().json(forms))
        }
        Role::Student => {
            let student = ident.require_student()?;
            let forms = form::find_for_student(&pool, student).await?;

            let mut annotated = Vec::with_capacity(forms.len());
            for f in forms {
                let submitted = response::has_submitted(&pool, f.id, student.id).await?;
                annotated.push(serde_json::json!({
                    "form": f,
                    "submitted": submitted,
                }));
            }
            Ok(HttpResponse::Ok().json(annotated))
        }
    }
}

/// GET /api/v1/forms/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_staff()?;

    let f = form::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(f))
}

/// POST /api/v1/forms — create one form instance by hand.
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewForm>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = form::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }
    if form::exists(&pool, &body).await? {
        return Err(AppError::Conflict(
            "A form for this teaching assignment already exists".to_string(),
        ));
    }

    let id = form::create(&pool, &body).await?;
    let created = form::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(created))
}

/// POST /api/v1/forms/generate — create form instances for a cohort from
/// its stored timetable entries. Returns a bulk summary.
pub async fn generate(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if body.division.trim().is_empty() || body.course.trim().is_empty() {
        return Err(AppError::Validation(
            "Division and course are required".to_string(),
        ));
    }

    let result = form::generate(&pool, &body).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PUT /api/v1/forms/{id}/status — open or close a form.
pub async fn update_status(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let id = path.into_inner();
    form::update_status(&pool, id, &body.status).await?;
    let updated = form::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/forms/{id} — responses cascade.
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    form::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
