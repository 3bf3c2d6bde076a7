use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roll_no: String,
    pub semester: i64,
    pub course: String,
    pub division: String,
    /// Lab batch tag (e.g. "B1"). Empty when the student has no batch.
    pub batch: String,
    pub created_at: String,
}

/// Input for creating a student, singly or in bulk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub roll_no: String,
    pub semester: i64,
    pub course: String,
    pub division: String,
    #[serde(default)]
    pub batch: String,
}
