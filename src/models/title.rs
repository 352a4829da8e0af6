use serde::{Deserialize, Serialize};

/// Label shown when a student has not reached any title threshold.
pub const NO_TITLE: &str = "無稱號";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleRule {
    pub score: f64,
    pub title: String,
}

impl TitleRule {
    pub fn new(score: f64, title: impl Into<String>) -> Self {
        Self {
            score,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TitleConfig {
    pub enabled: bool,
    pub rules: Vec<TitleRule>,
}

impl TitleConfig {
    pub fn new(rules: Vec<TitleRule>) -> Self {
        Self {
            enabled: true,
            rules,
        }
    }

    /// Rules that apply to individual students, empty when titles are switched off.
    pub fn active_rules(&self) -> &[TitleRule] {
        if self.enabled {
            &self.rules
        } else {
            &[]
        }
    }
}
