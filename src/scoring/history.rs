use serde::Serialize;
use tracing::debug;

use crate::models::LogEntry;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryPage<'a> {
    pub logs: Vec<&'a LogEntry>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
}

impl HistoryPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum History<'a> {
    /// The student has no log entries at all.
    NoHistory,
    Page(HistoryPage<'a>),
}

impl<'a> History<'a> {
    pub fn page(&self) -> Option<&HistoryPage<'a>> {
        match self {
            History::NoHistory => None,
            History::Page(page) => Some(page),
        }
    }
}

/// One page of `student`'s log entries, in source order.
///
/// The requested page is clamped into the valid range; page numbers start at 1.
pub fn paginate<'a>(logs: &'a [LogEntry], student: &str, page: usize, page_size: usize) -> History<'a> {
    let page_size = if page_size == 0 {
        debug!("History page size 0 requested, using 1");
        1
    } else {
        page_size
    };

    let entries: Vec<&LogEntry> = logs.iter().filter(|log| log.student == student).collect();
    if entries.is_empty() {
        return History::NoHistory;
    }

    let total_entries = entries.len();
    let total_pages = total_entries.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages);
    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_entries);

    History::Page(HistoryPage {
        logs: entries[start..end].to_vec(),
        current_page,
        total_pages,
        total_entries,
    })
}

/// Caller-held history position for the student currently being viewed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryCursor {
    pub student: Option<String>,
    pub page: usize,
}

impl HistoryCursor {
    /// Start over at page 1 for `student`.
    pub fn open(&mut self, student: &str) {
        self.student = Some(student.to_string());
        self.page = 1;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Current page of history for the open student, pulling the cursor back into range.
    pub fn view<'a>(&mut self, logs: &'a [LogEntry], page_size: usize) -> Option<History<'a>> {
        let student = self.student.as_deref()?;
        let history = paginate(logs, student, self.page, page_size);
        if let History::Page(page) = &history {
            self.page = page.current_page;
        }
        Some(history)
    }
}
