use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::admin::{self, NewAdmin};

/// GET /api/v1/admins
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let admins = admin::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(admins))
}

/// POST /api/v1/admins
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewAdmin>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if let Some(reason) = admin::validate_new(&body) {
        return Err(AppError::Validation(reason));
    }

    let id = admin::create(&pool, &body).await?;
    let created = admin::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(created))
}

/// DELETE /api/v1/admins/{id}
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    admin::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
