use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Student, TitleRule};
use crate::scoring::tier::resolve_tier;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleEntry<'a> {
    pub rule: &'a TitleRule,
    pub holders: Vec<&'a str>,
}

/// Case-insensitive name ordering with a code point tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Names of the students currently holding each title.
pub fn title_holders<'a>(rules: &'a [TitleRule], students: &'a [Student]) -> HashMap<&'a str, Vec<&'a str>> {
    let mut holders: HashMap<&str, Vec<&str>> = HashMap::new();
    for student in students {
        if let Some(rule) = resolve_tier(rules, student.cumulative_score) {
            holders.entry(rule.title.as_str()).or_default().push(student.name.as_str());
        }
    }
    for names in holders.values_mut() {
        names.sort_by(|a, b| compare_names(a, b));
    }
    holders
}

/// Every title rule from the lowest threshold up, each with its sorted holders.
pub fn title_catalogue<'a>(rules: &'a [TitleRule], students: &'a [Student]) -> Vec<TitleEntry<'a>> {
    let holders = title_holders(rules, students);

    let mut ordered: Vec<&TitleRule> = rules.iter().collect();
    ordered.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));

    ordered
        .into_iter()
        .map(|rule| TitleEntry {
            rule,
            holders: holders.get(rule.title.as_str()).cloned().unwrap_or_default(),
        })
        .collect()
}
