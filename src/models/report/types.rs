use serde::Serialize;

use crate::models::form::Form;

/// Aggregated statistics for one question within a form's responses.
/// Text and type come from the response-item snapshots, so the report is
/// stable under later catalog edits.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionStat {
    pub question_id: i64,
    pub question_text: String,
    pub question_type: String,
    pub response_count: usize,
    /// Mean of raw ratings, displayed in the question's native scale.
    pub raw_mean: f64,
    /// Mean rescaled to the common 0–10 axis.
    pub normalized_mean: f64,
}

/// On-demand report for one form.
#[derive(Debug, Clone, Serialize)]
pub struct FormReport {
    pub form: Form,
    pub response_count: usize,
    /// Mean of per-response averages; 0 when there are no responses.
    pub overall_average: f64,
    pub questions: Vec<QuestionStat>,
    pub comments: Vec<String>,
}

/// One row of the faculty ranking.
#[derive(Debug, Clone, Serialize)]
pub struct FacultyStanding {
    pub faculty_name: String,
    pub faculty_email: String,
    pub form_count: usize,
    pub response_count: usize,
    /// Mean of per-response averages across all of this faculty's forms;
    /// 0 when no responses exist.
    pub average: f64,
}
