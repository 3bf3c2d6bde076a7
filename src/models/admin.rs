use serde::{Deserialize, Serialize};

use crate::auth::validate;
use crate::db::{is_unique_violation, DbPool};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
}

pub fn validate_new(new: &NewAdmin) -> Option<String> {
    validate::validate_required(&new.name, "Name", 100).or_else(|| validate::validate_email(&new.email))
}

pub async fn find_all(pool: &DbPool) -> Result<Vec<Admin>, AppError> {
    let admins =
        sqlx::query_as::<_, Admin>("SELECT id, name, email, created_at FROM admins ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(admins)
}

pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Admin>, AppError> {
    let admin =
        sqlx::query_as::<_, Admin>("SELECT id, name, email, created_at FROM admins WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(admin)
}

pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<Admin>, AppError> {
    let admin = sqlx::query_as::<_, Admin>(
        "SELECT id, name, email, created_at FROM admins WHERE email = ?1",
    )
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

pub async fn create(pool: &DbPool, new: &NewAdmin) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO admins (name, email) VALUES (?1, ?2)")
        .bind(new.name.trim())
        .bind(new.email.trim().to_lowercase())
        .execute(pool)
        .await;

    match result {
        Ok(done) => Ok(done.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "An admin with email '{}' already exists",
            new.email.trim().to_lowercase()
        ))),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let done = sqlx::query("DELETE FROM admins WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if done.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}
