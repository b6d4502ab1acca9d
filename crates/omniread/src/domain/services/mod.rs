pub mod content;
pub mod history;
pub mod library;
pub mod resolver;
