use serde::Serialize;
use std::collections::HashSet;

use crate::models::{LogEntry, MeritBoardError, Result, ScoreCategory, ScoreItem, Student};
use crate::scoring::board::group_members;

/// Who a score change is aimed at before exclusions are applied.
#[derive(Debug, Clone, PartialEq)]
pub enum AwardTarget {
    Student(String),
    Group(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreChoice {
    Preset(u32),
    Custom(f64),
}

impl ScoreChoice {
    fn points(&self) -> Result<f64> {
        match *self {
            ScoreChoice::Preset(points) => Ok(points as f64),
            ScoreChoice::Custom(points) if points.is_finite() && points > 0.0 => Ok(points),
            ScoreChoice::Custom(points) => Err(MeritBoardError::InvalidCustomScore(points)),
        }
    }
}

/// Payload handed to the persistence API to record a score change.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AwardRequest {
    pub teacher_account: String,
    pub target_type: String,
    pub target_name: String,
    pub item: String,
    pub score: f64,
}

const TARGET_STUDENT: &str = "學生";
const TARGET_GROUP: &str = "小組";
const TARGET_ROSTER: &str = "自訂名單";

impl AwardRequest {
    /// Build a request, narrowing a group target to the members not in `excluded`.
    pub fn build(
        teacher_account: &str,
        target: &AwardTarget,
        item: &str,
        choice: ScoreChoice,
        excluded: &HashSet<String>,
        students: &[Student],
    ) -> Result<Self> {
        let score = choice.points()?;

        let (target_type, target_name) = match target {
            AwardTarget::Student(name) => {
                if !students.iter().any(|s| &s.name == name) {
                    return Err(MeritBoardError::UnknownTarget(name.clone()));
                }
                (TARGET_STUDENT, name.clone())
            }
            AwardTarget::Group(group) => {
                let members = group_members(students, group);
                let remaining: Vec<&str> = members
                    .iter()
                    .map(|s| s.name.as_str())
                    .filter(|name| !excluded.contains(*name))
                    .collect();

                if remaining.is_empty() {
                    return Err(MeritBoardError::EmptySelection { group: group.clone() });
                }
                if remaining.len() == members.len() {
                    (TARGET_GROUP, group.clone())
                } else {
                    (TARGET_ROSTER, remaining.join(","))
                }
            }
        };

        Ok(Self {
            teacher_account: teacher_account.to_string(),
            target_type: target_type.to_string(),
            target_name,
            item: item.to_string(),
            score,
        })
    }
}

/// Payload asking the persistence API to rewrite one log row.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditLogRequest {
    pub row_index: u64,
    pub new_name: String,
    pub new_score: f64,
    pub new_item: String,
}

impl EditLogRequest {
    /// Build an edit for `entry`. Every field must be filled in.
    pub fn build(entry: &LogEntry, new_name: &str, new_score: f64, new_item: &str) -> Result<Self> {
        let row_index = entry.row_index.ok_or(MeritBoardError::IncompleteEdit("rowIndex"))?;
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(MeritBoardError::IncompleteEdit("newName"));
        }
        if !new_score.is_finite() {
            return Err(MeritBoardError::IncompleteEdit("newScore"));
        }
        let new_item = new_item.trim();
        if new_item.is_empty() {
            return Err(MeritBoardError::IncompleteEdit("newItem"));
        }

        Ok(Self {
            row_index,
            new_name: new_name.to_string(),
            new_score,
            new_item: new_item.to_string(),
        })
    }
}

/// The log entry stored at spreadsheet row `row_index`.
pub fn find_log_row(logs: &[LogEntry], row_index: u64) -> Result<&LogEntry> {
    logs.iter()
        .find(|l| l.row_index == Some(row_index))
        .ok_or(MeritBoardError::UnknownLogRow(row_index))
}

/// Items offered under `category`, in spreadsheet order.
pub fn items_for(items: &[ScoreItem], category: ScoreCategory) -> Vec<&ScoreItem> {
    items.iter().filter(|it| it.category == Some(category)).collect()
}
