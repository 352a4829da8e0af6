pub mod tier;
pub mod ranking;
pub mod progress;
pub mod monthly;
pub mod history;
pub mod gifts;
pub mod titles;
pub mod board;
pub mod award;
pub mod verses;

pub use tier::{resolve_tier, gift_tier_for, FrameTier, Threshold};
pub use ranking::{compute_ranks, Medal};
pub use progress::{compute_progress, TierProgress};
pub use monthly::{compare_monthly_leader, MonthlyStanding, MonthlyStatus};
pub use history::{paginate, History, HistoryCursor, HistoryPage};
pub use gifts::{gift_shelves, sort_gifts, GiftShelf};
pub use titles::{title_catalogue, title_holders, TitleEntry};
pub use board::{student_cards, GroupFilter, LogFilter, StudentCard, StudentOrder};
pub use award::{find_log_row, AwardRequest, AwardTarget, EditLogRequest, ScoreChoice};
pub use verses::{verse_board, VerseBoard};
