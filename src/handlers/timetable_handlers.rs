use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::bulk::BulkResult;
use crate::models::faculty;
use crate::models::timetable::{self, csv, parser, NewTimetableEntry, NewTimetableImage};

/// GET /api/v1/timetable/entries
pub async fn list(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let entries = timetable::find_all(&pool).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// POST /api/v1/timetable/entries
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewTimetableEntry>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if body.kind != "theory" && body.kind != "lab" {
        return Err(AppError::Validation(
            "Kind must be 'theory' or 'lab'".to_string(),
        ));
    }
    if body.subject.trim().is_empty() || body.faculty_code.trim().is_empty() {
        return Err(AppError::Validation(
            "Subject and faculty code are required".to_string(),
        ));
    }
    if body.division.trim().is_empty() || body.course.trim().is_empty() {
        return Err(AppError::Validation(
            "Division and course are required".to_string(),
        ));
    }

    let id = timetable::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "id": id })))
}

/// POST /api/v1/timetable/import — CSV body, fixed header. Returns a bulk
/// summary; malformed rows never abort the rest of the file.
pub async fn import_csv(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: String,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let (rows, row_errors) = csv::parse_csv(&body).map_err(AppError::Validation)?;

    let mut result = timetable::bulk_create(&pool, &rows).await?;
    csv::merge_row_errors(&mut result, row_errors);
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/v1/timetable/export — all entries as CSV.
pub async fn export_csv(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let entries = timetable::find_all(&pool).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .body(csv::to_csv(&entries)))
}

/// DELETE /api/v1/timetable/entries/{id}
pub async fn delete(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    timetable::delete(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// POST /api/v1/timetable/extract — run the heuristic extractor over pasted
/// timetable text. Proposes candidates only; nothing is committed.
pub async fn extract(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<ExtractRequest>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if body.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let codes = faculty::all_codes(&pool).await?;
    let candidates = parser::extract_entries(&body.text, &codes);
    Ok(HttpResponse::Ok().json(candidates))
}

#[derive(Debug, Deserialize)]
pub struct SheetImportRequest {
    pub url: String,
}

/// POST /api/v1/timetable/sheet-import — fetch a published spreadsheet's
/// CSV export and return the parsed rows for review. Upstream failure is a
/// 502, never a 500.
pub async fn sheet_import(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<SheetImportRequest>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    let url = body.url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::Validation(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    let response = reqwest::get(url)
        .await
        .map_err(|e| AppError::Upstream(format!("fetch failed: {e}")))?;
    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "fetch returned status {}",
            response.status()
        )));
    }
    let text = response
        .text()
        .await
        .map_err(|e| AppError::Upstream(format!("read failed: {e}")))?;

    let (rows, errors) = csv::parse_csv(&text).map_err(AppError::Validation)?;
    let mut result = BulkResult::default();
    csv::merge_row_errors(&mut result, errors);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "rows": rows,
        "errors": result.errors,
    })))
}

// ── Timetable images ────────────────────────────────────────────────

/// GET /api/v1/timetable/images — any authenticated caller; students check
/// their cohort's posted timetable here.
pub async fn list_images(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    auth::current(&req, &pool, &config).await?;

    let images = timetable::find_images(&pool).await?;
    Ok(HttpResponse::Ok().json(images))
}

/// POST /api/v1/timetable/images
pub async fn upload_image(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<NewTimetableImage>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    if body.file_name.trim().is_empty() || body.data.trim().is_empty() {
        return Err(AppError::Validation(
            "File name and data are required".to_string(),
        ));
    }
    if body.division.trim().is_empty() || body.course.trim().is_empty() {
        return Err(AppError::Validation(
            "Division and course are required".to_string(),
        ));
    }

    let id = timetable::create_image(&pool, &body).await?;
    let image = timetable::find_image_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(image))
}

/// DELETE /api/v1/timetable/images/{id}
pub async fn delete_image(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let ident = auth::current(&req, &pool, &config).await?;
    ident.require_admin()?;

    timetable::delete_image(&pool, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
