#[macro_use]
extern crate log;

pub mod anilist;
pub use anilist::AniList;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("graphql error: {0}")]
    GraphQl(String),
    #[error("empty response")]
    EmptyResponse,
}
