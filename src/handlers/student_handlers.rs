use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::student::{self, NewStudent};

/// GET /api/v1/students
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let students = student::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(students))
}

/// POST /api/v1/students
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewStudent>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = student::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = student::create(&pool, &body).await?;
    let created = student::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(created))
}

#[derive(Debug, Deserialize)]
pub struct BulkStudents {
    pub students: Vec<NewStudent>,
}

/// POST /api/v1/students/bulk — import many; per-row outcomes, partial
/// success expected.
pub async fn bulk_create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<BulkStudents>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let result = student::bulk_create(&pool, &body.students).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PUT /api/v1/students/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<NewStudent>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = student::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = path.into_inner();
    student::update(&pool, id, &body).await?;
    let updated = student::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/students/{id}
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    student::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
pub struct BulkIds {
    pub ids: Vec<i64>,
}

/// POST /api/v1/students/bulk-delete
pub async fn bulk_delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<BulkIds>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let result = student::bulk_delete(&pool, &body.ids).await?;
    Ok(HttpResponse::Ok().json(result))
}
