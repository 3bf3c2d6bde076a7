use chrono::Utc;

use super::types::{
    Response, ResponseItem, ResponseWithItems, SubmissionError, SubmissionRequest,
};
use crate::db::{is_unique_violation, DbPool};
use crate::errors::AppError;
use crate::models::form::Form;
use crate::models::student::Student;
use crate::rating;

const SELECT_RESPONSE: &str = "\
    SELECT id, form_id, student_id, comment, submitted_at \
    FROM responses";

/// Submit one response. All preconditions are checked and all rows written
/// inside a single transaction — on any failure nothing is persisted.
///
/// Precondition order: student exists, form exists, cohort authorization,
/// no prior submission. The UNIQUE(form_id, student_id) constraint backs
/// the duplicate check against a concurrent submission that passes the
/// existence check before either transaction commits.
pub async fn submit(
    pool: &DbPool,
    form_id: i64,
    student_id: i64,
    request: &SubmissionRequest,
) -> Result<i64, SubmissionError> {
    let mut tx = pool.begin().await?;

    let student = sqlx::query_as::<_, Student>(
        "SELECT id, name, email, roll_no, semester, course, division, batch, created_at \
         FROM students WHERE id = ?1",
    )
    .bind(student_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(SubmissionError::StudentNotFound)?;

    let form = sqlx::query_as::<_, Form>(
        "SELECT id, form_type, subject_name, subject_code, faculty_name, faculty_email, \
                division, batch, semester, course, status, created_at \
         FROM forms WHERE id = ?1",
    )
    .bind(form_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(SubmissionError::FormNotFound)?;

    if !is_authorized(&form, &student) {
        tx.rollback().await?;
        return Err(SubmissionError::NotAuthorized);
    }

    let (existing,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM responses WHERE form_id = ?1 AND student_id = ?2",
    )
    .bind(form_id)
    .bind(student_id)
    .fetch_one(&mut *tx)
    .await?;
    if existing > 0 {
        tx.rollback().await?;
        return Err(SubmissionError::DuplicateSubmission);
    }

    let submitted_at = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let comment = request
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let inserted = sqlx::query(
        "INSERT INTO responses (form_id, student_id, comment, submitted_at) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(form_id)
    .bind(student_id)
    .bind(comment)
    .bind(&submitted_at)
    .execute(&mut *tx)
    .await;

    let response_id = match inserted {
        Ok(done) => done.last_insert_rowid(),
        Err(e) if is_unique_violation(&e) => {
            tx.rollback().await?;
            return Err(SubmissionError::DuplicateSubmission);
        }
        Err(e) => return Err(e.into()),
    };

    for input in &request.ratings {
        let question: Option<(String, String)> = sqlx::query_as(
            "SELECT text, question_type FROM questions WHERE id = ?1",
        )
        .bind(input.question_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((text, question_type)) = question else {
            tx.rollback().await?;
            return Err(SubmissionError::UnknownQuestion(input.question_id));
        };

        sqlx::query(
            "INSERT INTO response_items (response_id, question_id, rating, question_text, question_type) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(response_id)
        .bind(input.question_id)
        .bind(rating::clamp_rating(input.rating))
        .bind(&text)
        .bind(&question_type)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(response_id)
}

/// Cohort authorization for a submission: matching semester, course, and
/// division, form still active, and either no batch restriction on the form
/// or a batch equal to the student's.
pub fn is_authorized(form: &Form, student: &Student) -> bool {
    let batch_ok = match form.batch.as_deref() {
        None | Some("") => true,
        Some(batch) => batch == student.batch,
    };

    form.status == "active"
        && form.semester == student.semester
        && form.course == student.course
        && form.division == student.division
        && batch_ok
}

/// All responses for a form, each with its item snapshots.
pub async fn find_by_form(pool: &DbPool, form_id: i64) -> Result<Vec<ResponseWithItems>, AppError> {
    let sql = format!("{SELECT_RESPONSE} WHERE form_id = ?1 ORDER BY id");
    let responses = sqlx::query_as::<_, Response>(&sql)
        .bind(form_id)
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(responses.len());
    for response in responses {
        let items = find_items(pool, response.id).await?;
        out.push(ResponseWithItems { response, items });
    }
    Ok(out)
}

pub async fn find_items(pool: &DbPool, response_id: i64) -> Result<Vec<ResponseItem>, AppError> {
    let items = sqlx::query_as::<_, ResponseItem>(
        "SELECT id, response_id, question_id, rating, question_text, question_type \
         FROM response_items WHERE response_id = ?1 ORDER BY id",
    )
    .bind(response_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Response>, AppError> {
    let sql = format!("{SELECT_RESPONSE} WHERE id = ?1");
    let response = sqlx::query_as::<_, Response>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(response)
}

/// Whether this student already submitted to this form.
pub async fn has_submitted(
    pool: &DbPool,
    form_id: i64,
    student_id: i64,
) -> Result<bool, AppError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM responses WHERE form_id = ?1 AND student_id = ?2",
    )
    .bind(form_id)
    .bind(student_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Admin cleanup. Items cascade.
pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM responses WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
