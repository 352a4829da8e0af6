use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::{Result, Snapshot};
use crate::source::{raw::parse_snapshot, SnapshotSource};

/// Reads an exported initial-data payload from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<Snapshot> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let snapshot = parse_snapshot(&contents)?;
        info!(
            "Loaded {} students and {} logs from {}",
            snapshot.students.len(),
            snapshot.logs.len(),
            self.path.display()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MeritBoardError;

    #[tokio::test]
    async fn test_fetch_reads_payload() {
        let path = std::env::temp_dir().join(format!("merit_board_snapshot_{}.json", std::process::id()));
        tokio::fs::write(&path, r#"{"students": [{"姓名": "Amy", "累積分數": "12"}]}"#)
            .await
            .unwrap();

        let source = JsonFileSource::new(&path);
        let snapshot = source.fetch().await.unwrap();
        assert_eq!(snapshot.students.len(), 1);
        assert_eq!(snapshot.students[0].cumulative_score, 12.0);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        let result = source.fetch().await;
        assert!(matches!(result, Err(MeritBoardError::IoError(_))));
    }
}
