use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{normalize_group, LogEntry, Snapshot, Student, TitleRule, UNASSIGNED_GROUP};
use crate::scoring::{
    ranking::{compute_ranks, Medal},
    tier::{resolve_tier, FrameTier},
    titles::compare_names,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StudentOrder {
    /// As delivered by the spreadsheet.
    #[default]
    Original,
    ByCumulative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupFilter {
    #[default]
    All,
    Group(String),
}

impl GroupFilter {
    pub fn from_option(group: Option<&str>) -> Self {
        match group {
            None | Some("all") => GroupFilter::All,
            Some(group) => GroupFilter::Group(group.to_string()),
        }
    }

    pub fn matches(&self, group: &str) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Group(wanted) => normalize_group(wanted) == normalize_group(group),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentCard<'a> {
    pub name: &'a str,
    pub group: &'a str,
    pub total_score: f64,
    pub cumulative_score: f64,
    pub title: Option<&'a TitleRule>,
    pub monthly_king: bool,
    pub frame: Option<FrameTier>,
    pub rank: u32,
    pub medal: Option<Medal>,
    pub image_url: Option<&'a str>,
}

/// Stable sort by cumulative score, highest first.
pub fn sort_by_cumulative(students: &mut [&Student]) {
    students.sort_by(|a, b| {
        b.cumulative_score
            .partial_cmp(&a.cumulative_score)
            .unwrap_or(Ordering::Equal)
    });
}

/// Cards for the student wall. Ranks always come from the whole roster, not the filtered view.
pub fn student_cards<'a>(snapshot: &'a Snapshot, order: StudentOrder, filter: &GroupFilter) -> Vec<StudentCard<'a>> {
    let ranks = compute_ranks(&snapshot.students);
    let rules = snapshot.titles.active_rules();

    let mut students: Vec<&Student> = snapshot
        .students
        .iter()
        .filter(|s| filter.matches(&s.group))
        .collect();
    if order == StudentOrder::ByCumulative {
        sort_by_cumulative(&mut students);
    }

    students
        .into_iter()
        .map(|student| {
            let rank = ranks.get(&student.name).copied().unwrap_or(0);
            StudentCard {
                name: &student.name,
                group: student.group_key(),
                total_score: student.total_score,
                cumulative_score: student.cumulative_score,
                title: resolve_tier(rules, student.cumulative_score),
                monthly_king: snapshot.is_monthly_king(&student.name),
                frame: FrameTier::from_score(student.cumulative_score),
                rank,
                medal: Medal::from_rank(rank),
                image_url: student.image_url.as_deref(),
            }
        })
        .collect()
}

/// Group names: the supplied list, or the distinct student groups in first-seen order.
pub fn group_names(snapshot: &Snapshot) -> Vec<&str> {
    if !snapshot.groups.is_empty() {
        return snapshot.groups.iter().map(|g| g.trim()).collect();
    }

    let mut names: Vec<&str> = Vec::new();
    for student in &snapshot.students {
        let group = student.group_key();
        if !names.contains(&group) {
            names.push(group);
        }
    }
    names
}

pub fn group_members<'a>(students: &'a [Student], group: &str) -> Vec<&'a Student> {
    students.iter().filter(|s| s.is_in_group(group)).collect()
}

/// Sorted student names for a picker, optionally narrowed to one group.
pub fn student_options<'a>(students: &'a [Student], filter: &GroupFilter) -> Vec<&'a str> {
    let mut names: Vec<&str> = students
        .iter()
        .filter(|s| filter.matches(&s.group))
        .map(|s| s.name.as_str())
        .collect();
    names.sort_by(|a, b| compare_names(a, b));
    names
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub group: GroupFilter,
    pub student: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogLine<'a> {
    pub entry: &'a LogEntry,
    pub group: &'a str,
    pub teacher_name: &'a str,
}

/// Log entries matching `filter`, in source order. Unknown students count as unassigned.
pub fn filter_logs<'a>(snapshot: &'a Snapshot, filter: &LogFilter) -> Vec<LogLine<'a>> {
    snapshot
        .logs
        .iter()
        .filter_map(|entry| {
            let group = snapshot
                .find_student(&entry.student)
                .map(|s| s.group_key())
                .unwrap_or(UNASSIGNED_GROUP);
            let group_ok = filter.group.matches(group);
            let student_ok = filter.student.as_deref().map_or(true, |s| s == entry.student);
            (group_ok && student_ok).then(|| LogLine {
                entry,
                group,
                teacher_name: snapshot.teacher_name(&entry.teacher_account),
            })
        })
        .collect()
}

/// The newest `limit` entries for the scrolling ticker.
pub fn recent_logs(logs: &[LogEntry], limit: usize) -> &[LogEntry] {
    &logs[..limit.min(logs.len())]
}
