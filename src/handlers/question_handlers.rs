use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::question::{self, NewQuestion};

#[derive(Debug, Deserialize)]
pub struct QuestionListQuery {
    pub form_type: Option<String>,
}

/// GET /api/v1/questions — list the catalog, optionally one form type.
/// Any authenticated caller may read it (students need it to render forms).
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    query: web::Query<QuestionListQuery>,
) -> Result<HttpResponse, AppError> {
    auth::current(&req, &pool, &config).await?;

    let questions = question::find_all(&pool, query.form_type.as_deref()).await?;
    Ok(HttpResponse::Ok().json(questions))
}

/// POST /api/v1/questions — add a catalog question.
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewQuestion>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = question::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = question::create(&pool, &body).await?;
    let created = question::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/v1/questions/{id} — edit a catalog question. Previously
/// submitted responses keep their snapshots.
pub async fn update(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<NewQuestion>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = question::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = path.into_inner();
    question::update(&pool, id, &body).await?;
    let updated = question::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/questions/{id} — blocked with 409 while responses
/// reference the question.
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    question::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
