use async_trait::async_trait;

use omniread_lib::models::{Chapter, PageInfo};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceRepositoryError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("other error: {0}")]
    Other(String),
}

/// Chapter source with its own identifiers, reached through the relay.
///
/// An empty `Vec` is a valid answer and distinct from an error.
#[async_trait]
pub trait PrimarySourceRepository: Send + Sync {
    /// Identifiers of works matching `title`, highest relevance first
    async fn search_manga(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<String>, SourceRepositoryError>;

    /// Chapters ordered by number, highest first, all tagged with the primary source
    async fn get_chapters(&self, source_id: &str) -> Result<Vec<Chapter>, SourceRepositoryError>;

    async fn get_pages(&self, chapter_id: &str) -> Result<Vec<PageInfo>, SourceRepositoryError>;
}

/// Secondary provider keyed by title instead of identifier
#[async_trait]
pub trait FallbackSourceRepository: Send + Sync {
    async fn get_chapters(&self, title: &str) -> Result<Vec<Chapter>, SourceRepositoryError>;

    async fn get_pages(&self, chapter_id: &str) -> Result<Vec<PageInfo>, SourceRepositoryError>;
}
