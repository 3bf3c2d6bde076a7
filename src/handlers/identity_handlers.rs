use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;

/// GET /api/v1/me — echo the resolved identity so clients can route by
/// role without a second lookup.
pub async fn me(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    Ok(HttpResponse::Ok().json(ident))
}
