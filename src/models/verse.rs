use serde::{Deserialize, Serialize};

/// A scripture verse scheduled for a date range on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verse {
    pub text: String,
    pub reference: String,
    pub start_date: String,
    pub end_date: String,
    pub highlight: String,
}

impl Verse {
    pub fn is_highlighted(&self) -> bool {
        !self.highlight.trim().is_empty()
    }
}
