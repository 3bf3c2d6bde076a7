use super::types::{Faculty, NewFaculty};
use crate::auth::validate;
use crate::db::{is_unique_violation, DbPool};
use crate::errors::AppError;
use crate::models::bulk::BulkResult;

const SELECT_FACULTY: &str = "\
    SELECT id, name, email, code, department, created_at \
    FROM faculty";

pub fn validate_new(new: &NewFaculty) -> Option<String> {
    validate::validate_required(&new.name, "Name", 100)
        .or_else(|| validate::validate_email(&new.email))
        .or_else(|| validate::validate_optional(&new.department, "Department", 100))
        .or_else(|| {
            new.code
                .as_deref()
                .and_then(|c| validate::validate_optional(c, "Code", 10))
        })
}

pub async fn find_all(pool: &DbPool) -> Result<Vec<Faculty>, AppError> {
    let sql = format!("{SELECT_FACULTY} ORDER BY name");
    let faculty = sqlx::query_as::<_, Faculty>(&sql).fetch_all(pool).await?;
    Ok(faculty)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Faculty>, AppError> {
    let sql = format!("{SELECT_FACULTY} WHERE id = ?1");
    let faculty = sqlx::query_as::<_, Faculty>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(faculty)
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<Faculty>, AppError> {
    let sql = format!("{SELECT_FACULTY} WHERE email = ?1");
    let faculty = sqlx::query_as::<_, Faculty>(&sql)
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;
    Ok(faculty)
}

/// Lookup by timetable code, case-insensitive.
pub async fn find_by_code(pool: &DbPool, code: &str) -> Result<Option<Faculty>, AppError> {
    let sql = format!("{SELECT_FACULTY} WHERE UPPER(code) = ?1");
    let faculty = sqlx::query_as::<_, Faculty>(&sql)
        .bind(code.to_uppercase())
        .fetch_optional(pool)
        .await?;
    Ok(faculty)
}

/// All known timetable codes, uppercased — input to the timetable extractor.
pub async fn all_codes(pool: &DbPool) -> Result<Vec<String>, AppError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT UPPER(code) FROM faculty WHERE code IS NOT NULL AND code != ''")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(c,)| c).collect())
}

pub async fn create(pool: &DbPool, new: &NewFaculty) -> Result<i64, AppError> {
    let code = new
        .code
        .as_deref()
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());

    let result = sqlx::query(
        "INSERT INTO faculty (name, email, code, department) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(new.name.trim())
    .bind(new.email.trim().to_lowercase())
    .bind(code)
    .bind(new.department.trim())
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "A faculty member with email '{}' already exists",
            new.email.trim().to_lowercase()
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Insert many faculty records, one outcome per row.
pub async fn bulk_create(pool: &DbPool, rows: &[NewFaculty]) -> Result<BulkResult, AppError> {
    let mut result = BulkResult::default();

    for row in rows {
        if let Some(reason) = validate_new(row) {
            result.error(row, reason);
            continue;
        }
        match create(pool, row).await {
            Ok(_) => result.created += 1,
            Err(AppError::Conflict(_)) => result.skipped += 1,
            Err(e) => {
                log::warn!("Bulk faculty insert failed for {}: {e}", row.email);
                result.error(row, e.to_string());
            }
        }
    }

    Ok(result)
}

pub async fn update(pool: &DbPool, id: i64, new: &NewFaculty) -> Result<(), AppError> {
    let code = new
        .code
        .as_deref()
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());

    let result = sqlx::query(
        "UPDATE faculty SET name = ?1, email = ?2, code = ?3, department = ?4 WHERE id = ?5",
    )
    .bind(new.name.trim())
    .bind(new.email.trim().to_lowercase())
    .bind(code)
    .bind(new.department.trim())
    .bind(id)
    .execute(pool)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound),
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "A faculty member with email '{}' already exists",
            new.email.trim().to_lowercase()
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM faculty WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
