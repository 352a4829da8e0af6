use serde::{Deserialize, Serialize};

/// Group key used for students whose group field is blank.
pub const UNASSIGNED_GROUP: &str = "unassigned";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub name: String,
    pub group: String,
    /// Current-period score, reset periodically by the spreadsheet side.
    pub total_score: f64,
    pub cumulative_score: f64,
    pub monthly_score: f64,
    pub image_url: Option<String>,
}

impl Student {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            total_score: 0.0,
            cumulative_score: 0.0,
            monthly_score: 0.0,
            image_url: None,
        }
    }

    pub fn with_cumulative(mut self, score: f64) -> Self {
        self.cumulative_score = score;
        self
    }

    pub fn with_monthly(mut self, score: f64) -> Self {
        self.monthly_score = score;
        self
    }

    pub fn with_total(mut self, score: f64) -> Self {
        self.total_score = score;
        self
    }

    /// Trimmed group name, falling back to the unassigned group.
    pub fn group_key(&self) -> &str {
        normalize_group(&self.group)
    }

    pub fn is_in_group(&self, group: &str) -> bool {
        self.group_key() == normalize_group(group)
    }
}

pub fn normalize_group(group: &str) -> &str {
    let trimmed = group.trim();
    if trimmed.is_empty() {
        UNASSIGNED_GROUP
    } else {
        trimmed
    }
}

/// Account and display name of a teacher, used to label log entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub account: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_trims_and_defaults() {
        assert_eq!(Student::new("Amy", "  Tigers ").group_key(), "Tigers");
        assert_eq!(Student::new("Ben", "   ").group_key(), UNASSIGNED_GROUP);
        assert_eq!(Student::new("Cid", "").group_key(), UNASSIGNED_GROUP);
    }

    #[test]
    fn test_group_membership_ignores_padding() {
        let student = Student::new("Amy", "Tigers ");
        assert!(student.is_in_group(" Tigers"));
        assert!(!student.is_in_group("Lions"));
    }
}
