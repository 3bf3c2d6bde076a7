use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::faculty::{self, NewFaculty};

/// GET /api/v1/faculty
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let members = faculty::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(members))
}

/// POST /api/v1/faculty
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewFaculty>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = faculty::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = faculty::create(&pool, &body).await?;
    let created = faculty::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(created))
}

#[derive(Debug, Deserialize)]
pub struct BulkFaculty {
    pub faculty: Vec<NewFaculty>,
}

/// POST /api/v1/faculty/bulk
pub async fn bulk_create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<BulkFaculty>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let result = faculty::bulk_create(&pool, &body.faculty).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PUT /api/v1/faculty/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<NewFaculty>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = faculty::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = path.into_inner();
    faculty::update(&pool, id, &body).await?;
    let updated = faculty::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/faculty/{id}
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    faculty::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
