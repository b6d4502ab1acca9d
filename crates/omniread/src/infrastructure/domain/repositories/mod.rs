pub mod fallback;
pub mod history;
pub mod library;
pub mod mangadex;
pub mod mapping;
pub mod store;
