use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    Add,
    Deduct,
}

impl ScoreCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Add => "加分",
            ScoreCategory::Deduct => "扣分",
        }
    }
    
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "加分" | "add" => Some(ScoreCategory::Add),
            "扣分" | "deduct" => Some(ScoreCategory::Deduct),
            _ => None,
        }
    }
    
    /// Quick-pick point values offered for this category.
    pub fn presets(&self) -> &'static [u32] {
        match self {
            ScoreCategory::Add => &[1, 2, 3, 4, 5],
            ScoreCategory::Deduct => &[1, 2, 3, 5, 7],
        }
    }
}

/// A named reason for awarding or deducting points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreItem {
    pub name: String,
    pub category: Option<ScoreCategory>,
}
