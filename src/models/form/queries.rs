use super::types::{Form, FormFilter, GenerateRequest, NewForm};
use crate::auth::validate;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::bulk::BulkResult;
use crate::models::student::Student;
use crate::models::{faculty, timetable};

const SELECT_FORM: &str = "\
    SELECT id, form_type, subject_name, subject_code, faculty_name, faculty_email, \
           division, batch, semester, course, status, created_at \
    FROM forms";

pub fn validate_new(new: &NewForm) -> Option<String> {
    validate::validate_form_type(&new.form_type)
        .or_else(|| validate::validate_required(&new.subject_name, "Subject name", 100))
        .or_else(|| validate::validate_required(&new.faculty_name, "Faculty name", 100))
        .or_else(|| validate::validate_email(&new.faculty_email))
        .or_else(|| validate::validate_required(&new.division, "Division", 10))
        .or_else(|| validate::validate_required(&new.course, "Course", 50))
        .or_else(|| validate::validate_semester(new.semester))
}

/// List forms with optional filters, newest first.
pub async fn find_all(pool: &DbPool, filter: &FormFilter) -> Result<Vec<Form>, AppError> {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(status) = filter.status.as_deref().filter(|s| !s.is_empty()) {
        binds.push(status.to_string());
        clauses.push(format!("status = ?{}", binds.len()));
    }
    if let Some(course) = filter.course.as_deref().filter(|s| !s.is_empty()) {
        binds.push(course.to_string());
        clauses.push(format!("course = ?{}", binds.len()));
    }
    if let Some(semester) = filter.semester {
        binds.push(semester.to_string());
        clauses.push(format!("semester = ?{}", binds.len()));
    }
    if let Some(division) = filter.division.as_deref().filter(|s| !s.is_empty()) {
        binds.push(division.to_string());
        clauses.push(format!("division = ?{}", binds.len()));
    }
    if let Some(email) = filter.faculty_email.as_deref().filter(|s| !s.is_empty()) {
        binds.push(email.to_lowercase());
        clauses.push(format!("LOWER(faculty_email) = ?{}", binds.len()));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    let sql = format!("{SELECT_FORM}{where_clause} ORDER BY id DESC");

    let mut query = sqlx::query_as::<_, Form>(&sql);
    for bind in &binds {
        query = query.bind(bind);
    }
    let forms = query.fetch_all(pool).await?;
    Ok(forms)
}

/// Active forms a student may submit to: same cohort, and either no batch
/// restriction or a batch matching the student's.
pub async fn find_for_student(pool: &DbPool, student: &Student) -> Result<Vec<Form>, AppError> {
    let sql = format!(
        "{SELECT_FORM} \
         WHERE status = 'active' AND course = ?1 AND semester = ?2 AND division = ?3 \
           AND (batch IS NULL OR batch = '' OR batch = ?4) \
         ORDER BY subject_name, form_type"
    );
    let forms = sqlx::query_as::<_, Form>(&sql)
        .bind(&student.course)
        .bind(student.semester)
        .bind(&student.division)
        .bind(&student.batch)
        .fetch_all(pool)
        .await?;
    Ok(forms)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Form>, AppError> {
    let sql = format!("{SELECT_FORM} WHERE id = ?1");
    let form = sqlx::query_as::<_, Form>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(form)
}

/// A teaching assignment is unique at generation time by
/// (subject, faculty, division, batch) within a cohort.
pub async fn exists(pool: &DbPool, new: &NewForm) -> Result<bool, AppError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM forms \
         WHERE subject_name = ?1 AND LOWER(faculty_email) = ?2 AND division = ?3 \
           AND COALESCE(batch, '') = COALESCE(?4, '') \
           AND semester = ?5 AND course = ?6 AND form_type = ?7",
    )
    .bind(new.subject_name.trim())
    .bind(new.faculty_email.trim().to_lowercase())
    .bind(new.division.trim())
    .bind(new.batch.as_deref().map(str::trim))
    .bind(new.semester)
    .bind(new.course.trim())
    .bind(&new.form_type)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &DbPool, new: &NewForm) -> Result<i64, AppError> {
    let batch = new
        .batch
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string);

    let done = sqlx::query(
        "INSERT INTO forms (form_type, subject_name, subject_code, faculty_name, faculty_email, \
                            division, batch, semester, course, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 'active')",
    )
    .bind(&new.form_type)
    .bind(new.subject_name.trim())
    .bind(new.subject_code.as_deref().map(str::trim))
    .bind(new.faculty_name.trim())
    .bind(new.faculty_email.trim().to_lowercase())
    .bind(new.division.trim())
    .bind(batch)
    .bind(new.semester)
    .bind(new.course.trim())
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}

/// Generate form instances from the stored timetable entries of one cohort.
///
/// Theory entries produce one form per (subject, faculty); lab entries keep
/// their batch. Entries whose faculty code resolves to no record land in
/// `errors`; already-existing assignments are skipped.
pub async fn generate(pool: &DbPool, req: &GenerateRequest) -> Result<BulkResult, AppError> {
    let entries = timetable::find_for_cohort(pool, &req.course, req.semester, &req.division).await?;
    let mut result = BulkResult::default();

    for entry in &entries {
        let member = match faculty::find_by_code(pool, &entry.faculty_code).await? {
            Some(f) => f,
            None => {
                result.error(entry, format!("unknown faculty code '{}'", entry.faculty_code));
                continue;
            }
        };

        let new = NewForm {
            form_type: entry.kind.clone(),
            subject_name: entry.subject.clone(),
            subject_code: None,
            faculty_name: member.name.clone(),
            faculty_email: member.email.clone(),
            division: req.division.clone(),
            batch: entry.batch.clone(),
            semester: req.semester,
            course: req.course.clone(),
        };

        if exists(pool, &new).await? {
            result.skipped += 1;
            continue;
        }
        create(pool, &new).await?;
        result.created += 1;
    }

    Ok(result)
}

/// Move a form between `active` and `closed`.
pub async fn update_status(pool: &DbPool, id: i64, status: &str) -> Result<(), AppError> {
    if status != "active" && status != "closed" {
        return Err(AppError::Validation(
            "Status must be 'active' or 'closed'".to_string(),
        ));
    }
    let done = sqlx::query("UPDATE forms SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Delete a form. Responses and their items cascade.
pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM forms WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
