use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::{self, Role};
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::report;

/// GET /api/v1/reports/form/{id} — per-question breakdown for one form.
/// Admins see any form; faculty only their own.
pub async fn form_report(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_staff()?;

    let report = report::form_report(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;

    if ident.role == Role::Faculty
        && !report.form.faculty_email.eq_ignore_ascii_case(&ident.email)
    {
        return Err(AppError::Forbidden(
            "Faculty may only view reports for their own forms".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(report))
}

/// GET /api/v1/reports/faculty — the ranked faculty listing.
pub async fn faculty_standings(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_staff()?;

    let standings = report::faculty_standings(&pool).await?;
    Ok(HttpResponse::Ok().json(standings))
}
