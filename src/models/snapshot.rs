use serde::{Deserialize, Serialize};

use super::{Gift, LogEntry, ScoreItem, Student, Teacher, TitleConfig, Verse};

/// Everything fetched in one refresh. Calculators only ever read from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub items: Vec<ScoreItem>,
    /// Group names as supplied by the spreadsheet, possibly empty.
    pub groups: Vec<String>,
    pub gifts: Vec<Gift>,
    pub titles: TitleConfig,
    /// Newest first.
    pub logs: Vec<LogEntry>,
    pub monthly_kings: Vec<String>,
    pub verses: Vec<Verse>,
    pub settings: AppLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppLinks {
    pub e_learning_url: Option<String>,
}

impl AppLinks {
    /// The review-site link, only when it looks like a web address.
    pub fn e_learning_link(&self) -> Option<&str> {
        self.e_learning_url
            .as_deref()
            .map(str::trim)
            .filter(|url| url.starts_with("http"))
    }
}

impl Snapshot {
    pub fn find_student(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    pub fn is_monthly_king(&self, name: &str) -> bool {
        self.monthly_kings.iter().any(|k| k == name)
    }

    /// Display name of the teacher behind an account, falling back to the account id.
    pub fn teacher_name<'a>(&'a self, account: &'a str) -> &'a str {
        self.teachers
            .iter()
            .find(|t| t.account == account)
            .map(|t| t.name.as_str())
            .unwrap_or(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_e_learning_link_requires_http() {
        let links = AppLinks { e_learning_url: Some("https://review.example.com".to_string()) };
        assert_eq!(links.e_learning_link(), Some("https://review.example.com"));

        let links = AppLinks { e_learning_url: Some("review.example.com".to_string()) };
        assert_eq!(links.e_learning_link(), None);

        assert_eq!(AppLinks::default().e_learning_link(), None);
    }

    #[test]
    fn test_teacher_name_falls_back_to_account() {
        let snapshot = Snapshot {
            teachers: vec![Teacher { account: "t01".to_string(), name: "Ms. Chen".to_string() }],
            ..Default::default()
        };
        assert_eq!(snapshot.teacher_name("t01"), "Ms. Chen");
        assert_eq!(snapshot.teacher_name("t99"), "t99");
    }
}
