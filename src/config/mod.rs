pub mod settings;

pub use settings::{Settings, AppSettings, BoardSettings, SourceSettings};
