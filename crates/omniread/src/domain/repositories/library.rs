use async_trait::async_trait;

use omniread_lib::models::LibraryEntry;
use thiserror::Error;

use crate::domain::repositories::store::StoreError;

#[derive(Debug, Error)]
pub enum LibraryRepositoryError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("serialize error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

#[async_trait]
pub trait LibraryRepository: Send + Sync {
    async fn get_library(&self) -> Result<Vec<LibraryEntry>, LibraryRepositoryError>;

    async fn save_library(&self, library: &[LibraryEntry]) -> Result<(), LibraryRepositoryError>;
}
