use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub student: String,
    /// Signed point delta.
    pub score: f64,
    pub item: String,
    pub time: Option<DateTime<Utc>>,
    pub teacher_account: String,
    /// Spreadsheet row used to address the entry when it is edited.
    pub row_index: Option<u64>,
}

impl LogEntry {
    pub fn new(student: impl Into<String>, score: f64, item: impl Into<String>) -> Self {
        Self {
            student: student.into(),
            score,
            item: item.into(),
            time: None,
            teacher_account: String::new(),
            row_index: None,
        }
    }

    pub fn is_award(&self) -> bool {
        self.score > 0.0
    }
}
