//! Shared test infrastructure for model layer tests.
//!
//! `setup_test_db()` builds a temporary SQLite database with the full
//! schema applied, plus helpers for the records most tests need.

#![allow(dead_code)]

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

use facfeed::db::MIGRATIONS;
use facfeed::models::faculty::NewFaculty;
use facfeed::models::form::NewForm;
use facfeed::models::question::NewQuestion;
use facfeed::models::student::NewStudent;
use facfeed::models::{faculty, form, question, student};

pub struct TestDb {
    // Kept alive for the lifetime of the pool; dropping it deletes the file.
    _dir: TempDir,
    pool: SqlitePool,
}

impl TestDb {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Temporary database with schema applied. A single pooled connection keeps
/// transactional tests deterministic.
pub async fn setup_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let options = SqliteConnectOptions::new()
        .filename(&db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open test DB");

    sqlx::raw_sql(MIGRATIONS)
        .execute(&pool)
        .await
        .expect("Failed to run migrations");

    TestDb { _dir: dir, pool }
}

/// Create a student in cohort IT/sem 3/div A, batch B1 unless overridden.
pub async fn create_test_student(pool: &SqlitePool, suffix: &str, batch: &str) -> i64 {
    student::create(
        pool,
        &NewStudent {
            name: format!("Student {suffix}"),
            email: format!("student_{suffix}@test.edu"),
            roll_no: format!("IT{suffix}"),
            semester: 3,
            course: "IT".to_string(),
            division: "A".to_string(),
            batch: batch.to_string(),
        },
    )
    .await
    .expect("create student")
}

pub async fn create_test_faculty(pool: &SqlitePool, suffix: &str, code: &str) -> i64 {
    faculty::create(
        pool,
        &NewFaculty {
            name: format!("Prof {suffix}"),
            email: format!("prof_{suffix}@test.edu"),
            code: Some(code.to_string()),
            department: "IT".to_string(),
        },
    )
    .await
    .expect("create faculty")
}

/// Create an active theory form for cohort IT/sem 3/div A.
pub async fn create_test_form(pool: &SqlitePool, subject: &str, faculty_email: &str) -> i64 {
    create_test_form_with_batch(pool, subject, faculty_email, None).await
}

pub async fn create_test_form_with_batch(
    pool: &SqlitePool,
    subject: &str,
    faculty_email: &str,
    batch: Option<&str>,
) -> i64 {
    form::create(
        pool,
        &NewForm {
            form_type: if batch.is_some() { "lab" } else { "theory" }.to_string(),
            subject_name: subject.to_string(),
            subject_code: None,
            faculty_name: "Some Professor".to_string(),
            faculty_email: faculty_email.to_string(),
            division: "A".to_string(),
            batch: batch.map(str::to_string),
            semester: 3,
            course: "IT".to_string(),
        },
    )
    .await
    .expect("create form")
}

/// Create a catalog question, returning its id.
pub async fn create_test_question(
    pool: &SqlitePool,
    text: &str,
    form_type: &str,
    question_type: &str,
) -> i64 {
    question::create(
        pool,
        &NewQuestion {
            text: text.to_string(),
            position: 0,
            form_type: form_type.to_string(),
            question_type: question_type.to_string(),
        },
    )
    .await
    .expect("create question")
}
