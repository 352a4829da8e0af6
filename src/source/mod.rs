pub mod client;
pub mod file;
pub mod raw;

pub use client::SnapshotSource;
pub use file::JsonFileSource;
pub use raw::{coerce_score, parse_snapshot};

#[cfg(test)]
pub use client::MockSnapshotSource;
