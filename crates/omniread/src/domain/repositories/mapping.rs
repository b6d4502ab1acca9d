use async_trait::async_trait;

use thiserror::Error;

use crate::domain::{entities::mapping::Mapping, repositories::store::StoreError};

#[derive(Debug, Error)]
pub enum MappingRepositoryError {
    #[error("store error: {0}")]
    StoreError(#[from] StoreError),
}

#[async_trait]
pub trait MappingRepository: Send + Sync {
    async fn get_mapping(&self, work_id: i64) -> Result<Option<Mapping>, MappingRepositoryError>;

    async fn insert_mapping(
        &self,
        work_id: i64,
        mapping: &Mapping,
    ) -> Result<(), MappingRepositoryError>;
}
