use serde::{Deserialize, Serialize};

/// Summary returned by every bulk endpoint. Partial success is expected:
/// one bad row never fails the batch, it lands in `errors` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkResult {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<BulkError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkError {
    pub item: serde_json::Value,
    pub reason: String,
}

impl BulkResult {
    pub fn error(&mut self, item: impl Serialize, reason: impl Into<String>) {
        self.errors.push(BulkError {
            item: serde_json::to_value(item).unwrap_or_default(),
            reason: reason.into(),
        });
    }
}

/// Summary for bulk deletes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    pub deleted: usize,
    pub errors: Vec<BulkError>,
}

impl BulkDeleteResult {
    pub fn error(&mut self, item: impl Serialize, reason: impl Into<String>) {
        self.errors.push(BulkError {
            item: serde_json::to_value(item).unwrap_or_default(),
            reason: reason.into(),
        });
    }
}
