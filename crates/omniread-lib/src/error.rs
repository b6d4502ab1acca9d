use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown source tag: {0}")]
    UnknownSource(String),
    #[error("unknown library status: {0}")]
    UnknownStatus(String),
}
