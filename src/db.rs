use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub type DbPool = SqlitePool;

pub const MIGRATIONS: &str = include_str!("schema.sql");

/// Default question catalog, seeded once into an empty database.
/// (text, position, form_type, question_type)
const DEFAULT_QUESTIONS: &[(&str, i64, &str, &str)] = &[
    ("How would you rate the faculty's subject knowledge?", 1, "theory", "scale_1_10"),
    ("How clear are the explanations given in class?", 2, "theory", "scale_1_10"),
    ("How approachable is the faculty for doubts?", 3, "theory", "scale_3"),
    ("Does the faculty complete the syllabus on time?", 4, "theory", "yes_no"),
    ("Are classes held regularly and on time?", 5, "theory", "yes_no"),
    ("How well are the lab sessions organized?", 1, "lab", "scale_1_10"),
    ("How helpful is the faculty during practicals?", 2, "lab", "scale_3"),
    ("Are lab manuals and materials provided in advance?", 3, "lab", "yes_no"),
];

pub async fn init_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

/// Whether a sqlx error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(MIGRATIONS).execute(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Seed the default question catalog if the table is empty.
pub async fn seed_questions(pool: &DbPool) -> Result<(), sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        log::info!("Question catalog already seeded ({count} questions), skipping");
        return Ok(());
    }

    for (text, position, form_type, question_type) in DEFAULT_QUESTIONS {
        sqlx::query(
            "INSERT INTO questions (text, position, form_type, question_type) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(text)
        .bind(position)
        .bind(form_type)
        .bind(question_type)
        .execute(pool)
        .await?;
    }

    log::info!("Seeded {} default questions", DEFAULT_QUESTIONS.len());
    Ok(())
}
