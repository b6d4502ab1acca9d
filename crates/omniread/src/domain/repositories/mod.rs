#[cfg(test)]
pub mod fake;
pub mod history;
pub mod library;
pub mod mapping;
pub mod source;
pub mod store;
