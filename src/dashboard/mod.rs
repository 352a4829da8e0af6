pub mod state;

pub use state::{BoardState, StudentDetail};
