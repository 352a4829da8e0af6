pub mod student;
pub mod title;
pub mod gift;
pub mod log;
pub mod item;
pub mod verse;
pub mod snapshot;
pub mod error;

pub use student::*;
pub use title::*;
pub use gift::*;
pub use log::*;
pub use item::*;
pub use verse::*;
pub use snapshot::*;
pub use error::*;
