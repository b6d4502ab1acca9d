use async_trait::async_trait;

use crate::domain::{
    entities::mapping::Mapping,
    repositories::{
        mapping::{MappingRepository, MappingRepositoryError},
        store::KeyValueStore,
    },
};

/// Stored value for a work the chapter source has no match for
const NOT_FOUND: &str = "";

fn mapping_key(work_id: i64) -> String {
    format!("mapping_al_{work_id}_md")
}

#[derive(Clone)]
pub struct MappingRepositoryImpl<S>
where
    S: KeyValueStore,
{
    store: S,
}

impl<S> MappingRepositoryImpl<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> MappingRepository for MappingRepositoryImpl<S>
where
    S: KeyValueStore,
{
    async fn get_mapping(&self, work_id: i64) -> Result<Option<Mapping>, MappingRepositoryError> {
        let mapping = self
            .store
            .get(&mapping_key(work_id))
            .await?
            .map(|value| {
                if value == NOT_FOUND {
                    Mapping::NotFound
                } else {
                    Mapping::Found(value)
                }
            });

        Ok(mapping)
    }

    async fn insert_mapping(
        &self,
        work_id: i64,
        mapping: &Mapping,
    ) -> Result<(), MappingRepositoryError> {
        let value = mapping.source_id().unwrap_or(NOT_FOUND);
        self.store.set(&mapping_key(work_id), value).await?;

        Ok(())
    }
}
