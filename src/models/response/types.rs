use serde::{Deserialize, Serialize};

/// One student submission, with its per-question rating snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Response {
    pub id: i64,
    pub form_id: i64,
    pub student_id: i64,
    pub comment: Option<String>,
    pub submitted_at: String,
}

/// One rating inside a response. `question_text` / `question_type` are
/// snapshots taken at submission time; later catalog edits never touch them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ResponseItem {
    pub id: i64,
    pub response_id: i64,
    pub question_id: i64,
    pub rating: f64,
    pub question_text: String,
    pub question_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseWithItems {
    #[serde(flatten)]
    pub response: Response,
    pub items: Vec<ResponseItem>,
}

/// Submission payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub comment: Option<String>,
    pub ratings: Vec<RatingInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingInput {
    pub question_id: i64,
    pub rating: f64,
}

/// Why a submission was refused. Tagged inside the transaction and
/// translated to a status code at the handler boundary.
#[derive(Debug)]
pub enum SubmissionError {
    StudentNotFound,
    FormNotFound,
    NotAuthorized,
    DuplicateSubmission,
    UnknownQuestion(i64),
    Db(sqlx::Error),
}

impl From<sqlx::Error> for SubmissionError {
    fn from(e: sqlx::Error) -> Self {
        SubmissionError::Db(e)
    }
}
