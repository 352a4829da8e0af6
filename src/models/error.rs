use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeritBoardError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
    
    #[error("Snapshot source unavailable: {0}")]
    SourceUnavailable(String),
    
    #[error("Custom score must be a positive number, got {0}")]
    InvalidCustomScore(f64),
    
    #[error("At least one student of group {group} must be selected")]
    EmptySelection { group: String },
    
    #[error("Unknown award target: {0}")]
    UnknownTarget(String),

    #[error("No log entry at row {0}")]
    UnknownLogRow(u64),

    #[error("Log edit is missing {0}")]
    IncompleteEdit(&'static str),
}

pub type Result<T> = std::result::Result<T, MeritBoardError>;
