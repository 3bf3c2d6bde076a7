use super::types::{NewTimetableEntry, NewTimetableImage, TimetableEntry, TimetableImage};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::bulk::BulkResult;

const SELECT_ENTRY: &str = "\
    SELECT id, kind, subject, faculty_code, room, batch, division, semester, course, \
           day, slot, created_at \
    FROM timetable_entries";

pub async fn find_all(pool: &DbPool) -> Result<Vec<TimetableEntry>, AppError> {
    let sql = format!("{SELECT_ENTRY} ORDER BY course, semester, division, id");
    let entries = sqlx::query_as::<_, TimetableEntry>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(entries)
}

pub async fn find_for_cohort(
    pool: &DbPool,
    course: &str,
    semester: i64,
    division: &str,
) -> Result<Vec<TimetableEntry>, AppError> {
    let sql = format!(
        "{SELECT_ENTRY} WHERE course = ?1 AND semester = ?2 AND division = ?3 ORDER BY id"
    );
    let entries = sqlx::query_as::<_, TimetableEntry>(&sql)
        .bind(course)
        .bind(semester)
        .bind(division)
        .fetch_all(pool)
        .await?;
    Ok(entries)
}

pub async fn create(pool: &DbPool, new: &NewTimetableEntry) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO timetable_entries \
             (kind, subject, faculty_code, room, batch, division, semester, course, day, slot) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(&new.kind)
    .bind(new.subject.trim())
    .bind(new.faculty_code.trim().to_uppercase())
    .bind(new.room.as_deref().map(str::trim))
    .bind(new.batch.as_deref().map(str::trim))
    .bind(new.division.trim())
    .bind(new.semester)
    .bind(new.course.trim())
    .bind(new.day.as_deref().map(str::trim))
    .bind(new.slot.as_deref().map(str::trim))
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}

/// Insert many entries; each row succeeds or fails independently.
pub async fn bulk_create(
    pool: &DbPool,
    rows: &[NewTimetableEntry],
) -> Result<BulkResult, AppError> {
    let mut result = BulkResult::default();
    for row in rows {
        match create(pool, row).await {
            Ok(_) => result.created += 1,
            Err(e) => {
                log::warn!("Timetable entry insert failed: {e}");
                result.error(row, e.to_string());
            }
        }
    }
    Ok(result)
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM timetable_entries WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

// ── Timetable images ────────────────────────────────────────────────

pub async fn find_images(pool: &DbPool) -> Result<Vec<TimetableImage>, AppError> {
    let images = sqlx::query_as::<_, TimetableImage>(
        "SELECT id, division, semester, course, file_name, content_type, data, uploaded_at \
         FROM timetable_images ORDER BY course, semester, division",
    )
    .fetch_all(pool)
    .await?;
    Ok(images)
}

pub async fn find_image_by_id(pool: &DbPool, id: i64) -> Result<Option<TimetableImage>, AppError> {
    let image = sqlx::query_as::<_, TimetableImage>(
        "SELECT id, division, semester, course, file_name, content_type, data, uploaded_at \
         FROM timetable_images WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(image)
}

pub async fn create_image(pool: &DbPool, new: &NewTimetableImage) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO timetable_images (division, semester, course, file_name, content_type, data) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(new.division.trim())
    .bind(new.semester)
    .bind(new.course.trim())
    .bind(new.file_name.trim())
    .bind(new.content_type.trim())
    .bind(&new.data)
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}

pub async fn delete_image(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM timetable_images WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
