use super::types::{NewStudent, Student};
use crate::auth::validate;
use crate::db::{is_unique_violation, DbPool};
use crate::errors::AppError;
use crate::models::bulk::{BulkDeleteResult, BulkResult};

const SELECT_STUDENT: &str = "\
    SELECT id, name, email, roll_no, semester, course, division, batch, created_at \
    FROM students";

/// Validate a student row before insert. Returns the first problem found.
pub fn validate_new(new: &NewStudent) -> Option<String> {
    validate::validate_required(&new.name, "Name", 100)
        .or_else(|| validate::validate_email(&new.email))
        .or_else(|| validate::validate_required(&new.course, "Course", 50))
        .or_else(|| validate::validate_required(&new.division, "Division", 10))
        .or_else(|| validate::validate_semester(new.semester))
        .or_else(|| validate::validate_optional(&new.roll_no, "Roll number", 30))
        .or_else(|| validate::validate_optional(&new.batch, "Batch", 10))
}

pub async fn find_all(pool: &DbPool) -> Result<Vec<Student>, AppError> {
    let sql = format!("{SELECT_STUDENT} ORDER BY course, semester, division, roll_no, name");
    let students = sqlx::query_as::<_, Student>(&sql).fetch_all(pool).await?;
    Ok(students)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Student>, AppError> {
    let sql = format!("{SELECT_STUDENT} WHERE id = ?1");
    let student = sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(student)
}

/// Lookup for identity resolution. Emails are stored lowercase.
pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<Student>, AppError> {
    let sql = format!("{SELECT_STUDENT} WHERE email = ?1");
    let student = sqlx::query_as::<_, Student>(&sql)
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;
    Ok(student)
}

/// Insert one student. A duplicate email is a conflict.
pub async fn create(pool: &DbPool, new: &NewStudent) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO students (name, email, roll_no, semester, course, division, batch) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(new.name.trim())
    .bind(new.email.trim().to_lowercase())
    .bind(new.roll_no.trim())
    .bind(new.semester)
    .bind(new.course.trim())
    .bind(new.division.trim())
    .bind(new.batch.trim())
    .execute(pool)
    .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "A student with email '{}' already exists",
            new.email.trim().to_lowercase()
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Insert many students, collecting per-row outcomes. Invalid rows land in
/// `errors`; rows whose email already exists are counted as skipped.
pub async fn bulk_create(pool: &DbPool, rows: &[NewStudent]) -> Result<BulkResult, AppError> {
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
                log::warn!("Bulk student insert failed for {}: {e}", row.email);
                result.error(row, e.to_string());
            }
        }
    }

    Ok(result)
}

pub async fn update(pool: &DbPool, id: i64, new: &NewStudent) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE students SET name = ?1, email = ?2, roll_no = ?3, semester = ?4, \
                course = ?5, division = ?6, batch = ?7 \
         WHERE id = ?8",
    )
    .bind(new.name.trim())
    .bind(new.email.trim().to_lowercase())
    .bind(new.roll_no.trim())
    .bind(new.semester)
    .bind(new.course.trim())
    .bind(new.division.trim())
    .bind(new.batch.trim())
    .bind(id)
    .execute(pool)
    .await;

    match result {
        Ok(done) if done.rows_affected() == 0 => Err(AppError::NotFound),
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "A student with email '{}' already exists",
            new.email.trim().to_lowercase()
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM students WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Delete many students by id. Missing ids land in `errors`.
pub async fn bulk_delete(pool: &DbPool, ids: &[i64]) -> Result<BulkDeleteResult, AppError> {
    let mut result = BulkDeleteResult::default();
    for &id in ids {
        match delete(pool, id).await {
            Ok(()) => result.deleted += 1,
            Err(AppError::NotFound) => result.error(id, format!("no student with id {id}")),
            Err(e) => result.error(id, e.to_string()),
        }
    }
    Ok(result)
}
