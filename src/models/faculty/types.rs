use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Short code used in timetable cells (e.g. "JDS"). Uppercase.
    pub code: Option<String>,
    pub department: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaculty {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub department: String,
}
