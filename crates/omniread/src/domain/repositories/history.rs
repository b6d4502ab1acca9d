use async_trait::async_trait;

use omniread_lib::models::ReadingProgress;
use thiserror::Error;

use crate::domain::repositories::store::StoreError;

#[derive(Debug, Error)]
pub enum HistoryRepositoryError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("serialize error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Most recent first
    async fn get_history(&self) -> Result<Vec<ReadingProgress>, HistoryRepositoryError>;

    async fn save_history(&self, history: &[ReadingProgress]) -> Result<(), HistoryRepositoryError>;
}
