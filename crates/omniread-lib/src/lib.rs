pub mod error;
pub mod models;
pub mod prelude;

/// Upper bound of the reading history, most recent first
pub const HISTORY_LIMIT: usize = 50;
