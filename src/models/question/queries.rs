use super::types::{NewQuestion, Question};
use crate::auth::validate;
use crate::db::DbPool;
use crate::errors::AppError;

const SELECT_QUESTION: &str = "\
    SELECT id, text, position, form_type, question_type, created_at \
    FROM questions";

pub fn validate_new(new: &NewQuestion) -> Option<String> {
    validate::validate_required(&new.text, "Question text", 500)
        .or_else(|| validate::validate_form_type(&new.form_type))
        .or_else(|| validate::validate_question_type(&new.question_type))
}

/// List the catalog, optionally restricted to one form type, in position order.
pub async fn find_all(pool: &DbPool, form_type: Option<&str>) -> Result<Vec<Question>, AppError> {
    let questions = match form_type {
        Some(ft) => {
            let sql = format!("{SELECT_QUESTION} WHERE form_type = ?1 ORDER BY position, id");
            sqlx::query_as::<_, Question>(&sql)
                .bind(ft)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{SELECT_QUESTION} ORDER BY form_type, position, id");
            sqlx::query_as::<_, Question>(&sql).fetch_all(pool).await?
        }
    };
    Ok(questions)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Question>, AppError> {
    let sql = format!("{SELECT_QUESTION} WHERE id = ?1");
    let question = sqlx::query_as::<_, Question>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(question)
}

pub async fn create(pool: &DbPool, new: &NewQuestion) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO questions (text, position, form_type, question_type) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(new.text.trim())
    .bind(new.position)
    .bind(&new.form_type)
    .bind(&new.question_type)
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}

/// Update a catalog question. Historical reports are unaffected: response
/// items carry their own text/type snapshots.
pub async fn update(pool: &DbPool, id: i64, new: &NewQuestion) -> Result<(), AppError> {
    let done = sqlx::query(
        "UPDATE questions SET text = ?1, position = ?2, form_type = ?3, question_type = ?4 \
         WHERE id = ?5",
    )
    .bind(new.text.trim())
    .bind(new.position)
    .bind(&new.form_type)
    .bind(&new.question_type)
    .bind(id)
    .execute(pool)
    .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Count response items referencing a question — a referenced question
/// cannot be deleted.
pub async fn reference_count(pool: &DbPool, id: i64) -> Result<i64, AppError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM response_items WHERE question_id = ?1")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Delete a question. Blocked with a conflict while any submitted response
/// still references it.
pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let references = reference_count(pool, id).await?;
    if references > 0 {
        return Err(AppError::Conflict(format!(
            "Question is referenced by {references} submitted response item(s)"
        )));
    }

    let done = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
