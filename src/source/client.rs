use async_trait::async_trait;

use crate::models::{Result, Snapshot};

/// Where board data comes from. Each fetch yields a complete snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Short label for logs
    fn describe(&self) -> String;
    
    /// Fetch the full current data set
    async fn fetch(&self) -> Result<Snapshot>;
}
