use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub board: BoardSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Log entries per page in a student's history
    pub history_page_size: usize,
    /// Number of newest log entries shown in the ticker
    pub marquee_limit: usize,
    /// Display text for students without a group
    pub unassigned_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub snapshot_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Merit Board".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            board: BoardSettings {
                history_page_size: 5,
                marquee_limit: 15,
                unassigned_label: "未分組".to_string(),
            },
            source: SourceSettings {
                snapshot_path: "data/snapshot.json".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MERIT_BOARD").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Layered settings, or the defaults plus the load error when a layer is unreadable.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        match Self::new() {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.board.history_page_size == 0 {
            return Err("History page size must be at least 1".to_string());
        }

        if self.source.snapshot_path.trim().is_empty() {
            return Err("Snapshot path must not be empty".to_string());
        }

        Ok(())
    }

    /// Label to display for a group key, swapping in the configured unassigned text.
    pub fn group_label<'a>(&'a self, group: &'a str) -> &'a str {
        if group == crate::models::UNASSIGNED_GROUP {
            &self.board.unassigned_label
        } else {
            group
        }
    }
}
