use serde::{Deserialize, Serialize};

/// A concrete feedback form for one subject/faculty/division/batch
/// combination.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Form {
    pub id: i64,
    pub form_type: String,
    pub subject_name: String,
    pub subject_code: Option<String>,
    pub faculty_name: String,
    pub faculty_email: String,
    pub division: String,
    /// None means the form applies to every batch in the division.
    pub batch: Option<String>,
    pub semester: i64,
    pub course: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewForm {
    pub form_type: String,
    pub subject_name: String,
    #[serde(default)]
    pub subject_code: Option<String>,
    pub faculty_name: String,
    pub faculty_email: String,
    pub division: String,
    #[serde(default)]
    pub batch: Option<String>,
    pub semester: i64,
    pub course: String,
}

/// Optional filters for the admin/faculty form listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormFilter {
    pub status: Option<String>,
    pub course: Option<String>,
    pub semester: Option<i64>,
    pub division: Option<String>,
    pub faculty_email: Option<String>,
}

/// Cohort scope for generating forms from stored timetable entries.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub division: String,
    pub semester: i64,
    pub course: String,
}
