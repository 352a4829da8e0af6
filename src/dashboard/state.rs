use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::BoardSettings,
    models::{Result, Snapshot},
    scoring::{
        board::{self, GroupFilter, LogFilter, LogLine, StudentCard, StudentOrder},
        compare_monthly_leader, compute_progress, compute_ranks, gift_shelves, title_catalogue,
        verse_board, GiftShelf, History, HistoryCursor, MonthlyStanding, TierProgress, TitleEntry,
        VerseBoard,
    },
    source::SnapshotSource,
};

/// What the board shows when a single student is opened.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StudentDetail<'a> {
    pub name: &'a str,
    pub group: &'a str,
    pub rank: Option<u32>,
    pub progress: Option<TierProgress>,
    pub monthly: MonthlyStanding,
    pub history: History<'a>,
}

/// The whole application state: current data plus the viewer's choices.
pub struct BoardState {
    pub snapshot: Snapshot,
    pub order: StudentOrder,
    pub filter: GroupFilter,
    pub history: HistoryCursor,
    pub settings: BoardSettings,
}

impl BoardState {
    pub fn new(snapshot: Snapshot, settings: BoardSettings) -> Self {
        Self {
            snapshot,
            order: StudentOrder::default(),
            filter: GroupFilter::default(),
            history: HistoryCursor::default(),
            settings,
        }
    }

    /// Replace the snapshot with a fresh fetch. On failure the old data stays.
    pub async fn refresh(&mut self, source: &dyn SnapshotSource) -> Result<()> {
        match source.fetch().await {
            Ok(snapshot) => {
                info!(
                    "Refreshed from {}: {} students, {} logs",
                    source.describe(),
                    snapshot.students.len(),
                    snapshot.logs.len()
                );
                self.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                warn!("Refresh from {} failed, keeping previous data: {}", source.describe(), e);
                Err(e)
            }
        }
    }

    pub fn toggle_sort(&mut self) -> StudentOrder {
        self.order = match self.order {
            StudentOrder::Original => StudentOrder::ByCumulative,
            StudentOrder::ByCumulative => StudentOrder::Original,
        };
        self.order
    }

    pub fn set_filter(&mut self, filter: GroupFilter) {
        self.filter = filter;
    }

    pub fn student_cards(&self) -> Vec<StudentCard<'_>> {
        board::student_cards(&self.snapshot, self.order, &self.filter)
    }

    pub fn group_names(&self) -> Vec<&str> {
        board::group_names(&self.snapshot)
    }

    /// Names for the student picker, narrowed by the current group filter.
    pub fn student_options(&self) -> Vec<&str> {
        board::student_options(&self.snapshot.students, &self.filter)
    }

    pub fn e_learning_link(&self) -> Option<&str> {
        self.snapshot.settings.e_learning_link()
    }

    pub fn title_catalogue(&self) -> Vec<TitleEntry<'_>> {
        title_catalogue(&self.snapshot.titles.rules, &self.snapshot.students)
    }

    pub fn gift_shelves(&self) -> Vec<GiftShelf<'_>> {
        gift_shelves(&self.snapshot.gifts)
    }

    pub fn logs(&self, filter: &LogFilter) -> Vec<LogLine<'_>> {
        board::filter_logs(&self.snapshot, filter)
    }

    pub fn marquee(&self) -> &[crate::models::LogEntry] {
        board::recent_logs(&self.snapshot.logs, self.settings.marquee_limit)
    }

    pub fn verses(&self, today: NaiveDate) -> VerseBoard<'_> {
        verse_board(&self.snapshot.verses, today)
    }

    /// Point the history cursor at `name`, back on page 1.
    pub fn open_student(&mut self, name: &str) {
        self.history.open(name);
    }

    /// Detail view for the student under the history cursor.
    pub fn student_detail(&mut self) -> Option<StudentDetail<'_>> {
        let name = self.history.student.clone()?;
        let history = self.history.view(&self.snapshot.logs, self.settings.history_page_size)?;
        let student = self.snapshot.find_student(&name)?;

        let ranks = compute_ranks(&self.snapshot.students);
        Some(StudentDetail {
            name: &student.name,
            group: student.group_key(),
            rank: ranks.get(&student.name).copied(),
            progress: compute_progress(self.snapshot.titles.active_rules(), student.cumulative_score),
            monthly: compare_monthly_leader(&self.snapshot.students, student.group_key(), student),
            history,
        })
    }
}
