use actix_web::HttpRequest;
use serde::Serialize;

use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::faculty::Faculty;
use crate::models::student::Student;
use crate::models::{admin, faculty, student};

/// Request header carrying the caller's email identity.
pub const IDENTITY_HEADER: &str = "x-user-email";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Student,
}

/// Resolved caller identity. The student/faculty record is carried along so
/// handlers don't re-query for cohort fields.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<Faculty>,
}

impl Identity {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("admin role required".to_string()))
        }
    }

    /// Admin or faculty.
    pub fn require_staff(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin | Role::Faculty => Ok(()),
            Role::Student => Err(AppError::Forbidden("staff role required".to_string())),
        }
    }

    pub fn require_student(&self) -> Result<&Student, AppError> {
        self.student
            .as_ref()
            .ok_or_else(|| AppError::Forbidden("student role required".to_string()))
    }
}

/// Extract the identity header, or fail with 401.
fn header_email(req: &HttpRequest) -> Result<String, AppError> {
    let email = req
        .headers()
        .get(IDENTITY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_lowercase())
        .unwrap_or_default();

    if email.is_empty() {
        return Err(AppError::Unauthenticated);
    }
    Ok(email)
}

/// Resolve an email to a role by table lookup: admins first, then the
/// configured fallback allow-list, then faculty, then students. An email
/// matching no table resolves to no role and is rejected as unauthenticated.
pub async fn resolve(
    pool: &DbPool,
    config: &Config,
    email: &str,
) -> Result<Identity, AppError> {
    if admin::find_by_email(pool, email).await?.is_some() || config.is_fallback_admin(email) {
        return Ok(Identity {
            email: email.to_string(),
            role: Role::Admin,
            student: None,
            faculty: None,
        });
    }

    if let Some(f) = faculty::find_by_email(pool, email).await? {
        return Ok(Identity {
            email: email.to_string(),
            role: Role::Faculty,
            student: None,
            faculty: Some(f),
        });
    }

    if let Some(s) = student::find_by_email(pool, email).await? {
        return Ok(Identity {
            email: email.to_string(),
            role: Role::Student,
            student: Some(s),
            faculty: None,
        });
    }

    Err(AppError::Unauthenticated)
}

/// Resolve the calling request's identity, or fail with 401.
pub async fn current(
    req: &HttpRequest,
    pool: &DbPool,
    config: &Config,
) -> Result<Identity, AppError> {
    let email = header_email(req)?;
    resolve(pool, config, &email).await
}
