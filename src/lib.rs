pub mod models;
pub mod config;
pub mod scoring;
pub mod source;
pub mod dashboard;

pub use models::{Snapshot, Student, TitleConfig, TitleRule, Gift, LogEntry, MeritBoardError, Result};
pub use config::Settings;
pub use dashboard::BoardState;
