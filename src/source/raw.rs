//! Spreadsheet payload records and their one-time coercion into typed models.
//!
//! Field names mirror the spreadsheet columns. Every value arrives as loose
//! JSON, so numbers may be strings, blanks or missing entirely.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::models::{
    AppLinks, Gift, LogEntry, MeritBoardError, Quantity, Result, ScoreCategory, ScoreItem,
    Snapshot, Student, Teacher, TitleConfig, TitleRule, Verse,
};

const E_LEARNING_KEY: &str = "電子溫習站超連結";

/// Sheet-style timestamps without an offset, read as UTC.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Numeric reading of a loose value, `None` where a browser would produce NaN.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    };
    n.filter(|n| n.is_finite())
}

/// Score coercion: anything unreadable counts as 0.
pub fn coerce_score(value: &Value) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            // f64 Display drops a zero fraction, so 12.0 reads "12"
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn optional_text(value: &Value) -> Option<String> {
    let text = coerce_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Blank or missing quantity means unlimited stock; so does an unreadable one.
pub fn coerce_quantity(value: &Value) -> Quantity {
    match value {
        Value::Null => Quantity::Unlimited,
        Value::String(s) if s.is_empty() => Quantity::Unlimited,
        other => parse_number(other)
            .map(Quantity::Limited)
            .unwrap_or(Quantity::Unlimited),
    }
}

fn parse_time_text(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|t| t.and_utc())
}

/// Log timestamp: an ISO or sheet-style string, or epoch milliseconds.
fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_time_text(s),
        Value::Number(n) => n
            .as_f64()
            .filter(|ms| ms.is_finite())
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64)),
        _ => None,
    }
}

fn parse_row_index(value: &Value) -> Option<u64> {
    parse_number(value)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as u64)
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawStudent {
    #[serde(rename = "姓名")]
    pub name: Value,
    #[serde(rename = "分組")]
    pub group: Value,
    #[serde(rename = "總得分")]
    pub total_score: Value,
    #[serde(rename = "累積分數")]
    pub cumulative_score: Value,
    #[serde(rename = "本月得分")]
    pub monthly_score: Value,
    #[serde(rename = "圖片網址")]
    pub image_url: Value,
}

impl From<RawStudent> for Student {
    fn from(raw: RawStudent) -> Self {
        Student {
            name: coerce_text(&raw.name),
            group: coerce_text(&raw.group).trim().to_string(),
            total_score: coerce_score(&raw.total_score),
            cumulative_score: coerce_score(&raw.cumulative_score),
            monthly_score: coerce_score(&raw.monthly_score),
            image_url: optional_text(&raw.image_url),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawTeacher {
    #[serde(rename = "帳號")]
    pub account: Value,
    #[serde(rename = "姓名")]
    pub name: Value,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawItem {
    #[serde(rename = "項目名稱")]
    pub name: Value,
    #[serde(rename = "加扣分")]
    pub category: Value,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawGift {
    #[serde(rename = "禮物名稱")]
    pub name: Value,
    #[serde(rename = "所需分數")]
    pub required_score: Value,
    #[serde(rename = "數量")]
    pub quantity: Value,
    #[serde(rename = "圖片連結")]
    pub image_url: Value,
}

impl From<RawGift> for Gift {
    fn from(raw: RawGift) -> Self {
        Gift {
            name: coerce_text(&raw.name),
            required_score: coerce_score(&raw.required_score),
            quantity: coerce_quantity(&raw.quantity),
            image_url: optional_text(&raw.image_url),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawTitleRule {
    pub score: Value,
    pub title: Value,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawTitleConfig {
    pub enabled: bool,
    pub rules: Vec<RawTitleRule>,
}

impl From<RawTitleConfig> for TitleConfig {
    fn from(raw: RawTitleConfig) -> Self {
        TitleConfig {
            enabled: raw.enabled,
            rules: raw
                .rules
                .into_iter()
                .map(|r| TitleRule::new(coerce_score(&r.score), coerce_text(&r.title)))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLog {
    pub student: Value,
    pub score: Value,
    pub item: Value,
    pub time: Value,
    pub teacher_acc: Value,
    pub row_index: Value,
}

impl From<RawLog> for LogEntry {
    fn from(raw: RawLog) -> Self {
        LogEntry {
            student: coerce_text(&raw.student),
            score: coerce_score(&raw.score),
            item: coerce_text(&raw.item),
            time: parse_time(&raw.time),
            teacher_account: coerce_text(&raw.teacher_acc),
            row_index: parse_row_index(&raw.row_index),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawVerse {
    #[serde(rename = "經文")]
    pub text: Value,
    #[serde(rename = "出處")]
    pub reference: Value,
    #[serde(rename = "開始日期")]
    pub start_date: Value,
    #[serde(rename = "結束日期")]
    pub end_date: Value,
    #[serde(rename = "高亮提示本週金句")]
    pub highlight: Value,
}

impl From<RawVerse> for Verse {
    fn from(raw: RawVerse) -> Self {
        Verse {
            text: coerce_text(&raw.text),
            reference: coerce_text(&raw.reference),
            start_date: coerce_text(&raw.start_date),
            end_date: coerce_text(&raw.end_date),
            highlight: coerce_text(&raw.highlight),
        }
    }
}

/// The initial-data payload as served by the spreadsheet web app.
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSnapshot {
    pub error: Option<String>,
    pub students: Vec<RawStudent>,
    pub teachers: Vec<RawTeacher>,
    pub items: Vec<RawItem>,
    pub groups: Vec<Value>,
    pub gifts: Vec<RawGift>,
    pub titles: Option<RawTitleConfig>,
    pub logs: Vec<RawLog>,
    pub monthly_kings: Vec<Value>,
    pub bible_verses: Vec<RawVerse>,
    pub settings: HashMap<String, Value>,
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        let logs: Vec<LogEntry> = raw.logs.into_iter().map(LogEntry::from).collect();
        let undated = logs.iter().filter(|l| l.time.is_none()).count();
        if undated > 0 {
            warn!("{} log entries have no readable timestamp", undated);
        }

        Snapshot {
            students: raw.students.into_iter().map(Student::from).collect(),
            teachers: raw
                .teachers
                .into_iter()
                .map(|t| Teacher {
                    account: coerce_text(&t.account),
                    name: coerce_text(&t.name),
                })
                .collect(),
            items: raw
                .items
                .into_iter()
                .map(|it| ScoreItem {
                    name: coerce_text(&it.name),
                    category: ScoreCategory::from_str(&coerce_text(&it.category)),
                })
                .collect(),
            groups: raw.groups.iter().filter_map(optional_text).collect(),
            gifts: raw.gifts.into_iter().map(Gift::from).collect(),
            titles: raw.titles.map(TitleConfig::from).unwrap_or_default(),
            logs,
            monthly_kings: raw.monthly_kings.iter().filter_map(optional_text).collect(),
            verses: raw.bible_verses.into_iter().map(Verse::from).collect(),
            settings: AppLinks {
                e_learning_url: raw.settings.get(E_LEARNING_KEY).and_then(optional_text),
            },
        }
    }
}

/// Parse an initial-data payload, surfacing the web app's own error field.
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let raw: RawSnapshot = serde_json::from_str(json)?;
    if let Some(error) = raw.error.as_deref().filter(|e| !e.is_empty()) {
        return Err(MeritBoardError::SourceUnavailable(error.to_string()));
    }

    let snapshot = Snapshot::from(raw);
    debug!(
        "Parsed snapshot: {} students, {} logs, {} gifts, {} title rules",
        snapshot.students.len(),
        snapshot.logs.len(),
        snapshot.gifts.len(),
        snapshot.titles.rules.len()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce_score(&json!(12)), 12.0);
        assert_eq!(coerce_score(&json!(" 7.5 ")), 7.5);
        assert_eq!(coerce_score(&json!("")), 0.0);
        assert_eq!(coerce_score(&json!(null)), 0.0);
        assert_eq!(coerce_score(&json!("abc")), 0.0);
        assert_eq!(coerce_score(&json!("NaN")), 0.0);
        assert_eq!(coerce_score(&json!("inf")), 0.0);
        assert_eq!(coerce_score(&json!(true)), 1.0);
        assert_eq!(coerce_score(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_text_coercion_drops_zero_fraction() {
        assert_eq!(coerce_text(&json!(12.0)), "12");
        assert_eq!(coerce_text(&json!(12)), "12");
        assert_eq!(coerce_text(&json!(2.5)), "2.5");
        assert_eq!(coerce_text(&json!(null)), "");
    }

    #[test]
    fn test_time_formats() {
        let expected = DateTime::parse_from_rfc3339("2026-10-15T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parse_time(&json!("2026-10-15T08:30:00.000Z")), Some(expected));
        assert_eq!(parse_time(&json!("2026/10/15 08:30:00")), Some(expected));
        assert_eq!(parse_time(&json!("2026-10-15 08:30")), Some(expected));
        assert_eq!(parse_time(&json!(1792053000000.0)), Some(expected));
        assert_eq!(parse_time(&json!(1792053000000_i64)), Some(expected));
        assert_eq!(
            parse_time(&json!("2026/10/15")).map(|t| t.date_naive()),
            Some(expected.date_naive())
        );
        assert_eq!(parse_time(&json!("yesterday")), None);
        assert_eq!(parse_time(&json!(null)), None);
    }

    #[test]
    fn test_sheet_style_log_times_survive_parse() {
        let payload = json!({
            "logs": [
                {"student": "Amy", "score": 1, "item": "a", "time": "2026/10/15 08:30:00"},
                {"student": "Amy", "score": 1, "item": "b", "time": 1792053000000.0}
            ]
        });
        let snapshot = parse_snapshot(&payload.to_string()).unwrap();
        assert!(snapshot.logs.iter().all(|l| l.time.is_some()));
        assert_eq!(snapshot.logs[0].time, snapshot.logs[1].time);
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(coerce_quantity(&json!(null)), Quantity::Unlimited);
        assert_eq!(coerce_quantity(&json!("")), Quantity::Unlimited);
        assert_eq!(coerce_quantity(&json!("lots")), Quantity::Unlimited);
        assert_eq!(coerce_quantity(&json!(0)), Quantity::Limited(0.0));
        assert_eq!(coerce_quantity(&json!("0")), Quantity::Limited(0.0));
        assert_eq!(coerce_quantity(&json!(4)), Quantity::Limited(4.0));
    }

    #[test]
    fn test_parse_full_payload() {
        let payload = json!({
            "students": [
                {"姓名": "Amy", "分組": " Tigers ", "總得分": "3", "累積分數": 45, "本月得分": "", "圖片網址": ""},
                {"姓名": "Ben", "累積分數": "oops"}
            ],
            "teachers": [{"帳號": "t1", "姓名": "Ms. Lin"}],
            "items": [{"項目名稱": "homework", "加扣分": "加分"}],
            "groups": ["Tigers", ""],
            "gifts": [{"禮物名稱": "Pencil", "所需分數": "8", "數量": ""}],
            "titles": {"enabled": true, "rules": [{"score": "20", "title": "Reader"}]},
            "logs": [{"student": "Amy", "score": "-2", "item": "late", "time": "2026-10-15T08:30:00.000Z", "teacherAcc": "t1", "rowIndex": 12}],
            "monthlyKings": ["Amy"],
            "bibleVerses": [{"經文": "text", "出處": "Ps 23:1", "開始日期": "2026-10-12", "結束日期": "2026-10-18"}],
            "settings": {"電子溫習站超連結": "https://review.example.com"}
        });

        let snapshot = parse_snapshot(&payload.to_string()).unwrap();
        let amy = &snapshot.students[0];
        assert_eq!(amy.group, "Tigers");
        assert_eq!(amy.total_score, 3.0);
        assert_eq!(amy.cumulative_score, 45.0);
        assert_eq!(amy.monthly_score, 0.0);
        assert_eq!(amy.image_url, None);

        let ben = &snapshot.students[1];
        assert_eq!(ben.cumulative_score, 0.0);
        assert_eq!(ben.group_key(), crate::models::UNASSIGNED_GROUP);

        assert_eq!(snapshot.groups, vec!["Tigers"]);
        assert_eq!(snapshot.items[0].category, Some(ScoreCategory::Add));
        assert_eq!(snapshot.gifts[0].quantity, Quantity::Unlimited);
        assert_eq!(snapshot.titles.rules[0].score, 20.0);
        assert_eq!(snapshot.logs[0].score, -2.0);
        assert_eq!(snapshot.logs[0].row_index, Some(12));
        assert!(snapshot.logs[0].time.is_some());
        assert!(snapshot.is_monthly_king("Amy"));
        assert_eq!(snapshot.settings.e_learning_link(), Some("https://review.example.com"));
    }

    #[test]
    fn test_missing_titles_disabled() {
        let snapshot = parse_snapshot("{}").unwrap();
        assert!(!snapshot.titles.enabled);
        assert!(snapshot.students.is_empty());
    }

    #[test]
    fn test_error_field_surfaces() {
        let result = parse_snapshot(r#"{"error": "sheet locked"}"#);
        assert!(matches!(result, Err(MeritBoardError::SourceUnavailable(msg)) if msg == "sheet locked"));
    }
}
