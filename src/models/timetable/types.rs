use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimetableEntry {
    pub id: i64,
    /// 'theory' or 'lab'.
    pub kind: String,
    pub subject: String,
    pub faculty_code: String,
    pub room: Option<String>,
    pub batch: Option<String>,
    pub division: String,
    pub semester: i64,
    pub course: String,
    pub day: Option<String>,
    pub slot: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimetableEntry {
    pub kind: String,
    pub subject: String,
    pub faculty_code: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    pub division: String,
    pub semester: i64,
    pub course: String,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub slot: Option<String>,
}

/// A candidate entry proposed by the text extractor. Never committed
/// directly: valid and invalid candidates alike go back to the caller for
/// manual review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedEntry {
    pub kind: String,
    pub subject: String,
    pub faculty_code: String,
    pub room: Option<String>,
    pub batch: Option<String>,
    /// Whether the faculty code resolves to a known faculty record.
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimetableImage {
    pub id: i64,
    pub division: String,
    pub semester: i64,
    pub course: String,
    pub file_name: String,
    pub content_type: String,
    /// Base64 payload.
    pub data: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTimetableImage {
    pub division: String,
    pub semester: i64,
    pub course: String,
    pub file_name: String,
    pub content_type: String,
    pub data: String,
}
