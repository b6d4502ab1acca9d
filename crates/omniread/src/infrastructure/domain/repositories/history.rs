use async_trait::async_trait;
use omniread_lib::models::ReadingProgress;

use crate::domain::repositories::{
    history::{HistoryRepository, HistoryRepositoryError},
    store::KeyValueStore,
};

const HISTORY_KEY: &str = "omni_history";

#[derive(Clone)]
pub struct HistoryRepositoryImpl<S>
where
    S: KeyValueStore,
{
    store: S,
}

impl<S> HistoryRepositoryImpl<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> HistoryRepository for HistoryRepositoryImpl<S>
where
    S: KeyValueStore,
{
    async fn get_history(&self) -> Result<Vec<ReadingProgress>, HistoryRepositoryError> {
        let history = match self.store.get(HISTORY_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => vec![],
        };

        Ok(history)
    }

    async fn save_history(&self, history: &[ReadingProgress]) -> Result<(), HistoryRepositoryError> {
        let raw = serde_json::to_string(history)?;
        self.store.set(HISTORY_KEY, &raw).await?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::infrastructure::domain::repositories::store::MemoryStore;

    #[tokio::test]
    async fn test_reads_existing_blob() {
        let store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{"mangaId":7,"lastReadChapterId":"c-1","lastReadPage":3,"timestamp":1700000000000}]"#,
            )
            .await
            .unwrap();

        let repo = HistoryRepositoryImpl::new(store);
        let history = repo.get_history().await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].manga_id, 7);
        assert_eq!(history[0].last_read_page, 3);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_an_error() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").await.unwrap();

        let repo = HistoryRepositoryImpl::new(store);
        assert!(matches!(
            repo.get_history().await,
            Err(HistoryRepositoryError::SerializeError(_))
        ));
    }
}
