use serde::{Deserialize, Serialize};

/// One feedback question from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub text: String,
    /// Ordering key within a form type.
    pub position: i64,
    pub form_type: String,
    pub question_type: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    #[serde(default)]
    pub position: i64,
    pub form_type: String,
    pub question_type: String,
}
