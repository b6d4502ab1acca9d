use async_trait::async_trait;
use omniread_lib::models::LibraryEntry;

use crate::domain::repositories::{
    library::{LibraryRepository, LibraryRepositoryError},
    store::KeyValueStore,
};

const LIBRARY_KEY: &str = "omni_library";

#[derive(Clone)]
pub struct LibraryRepositoryImpl<S>
where
    S: KeyValueStore,
{
    store: S,
}

impl<S> LibraryRepositoryImpl<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> LibraryRepository for LibraryRepositoryImpl<S>
where
    S: KeyValueStore,
{
    async fn get_library(&self) -> Result<Vec<LibraryEntry>, LibraryRepositoryError> {
        let library = match self.store.get(LIBRARY_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => vec![],
        };

        Ok(library)
    }

    async fn save_library(&self, library: &[LibraryEntry]) -> Result<(), LibraryRepositoryError> {
        let raw = serde_json::to_string(library)?;
        self.store.set(LIBRARY_KEY, &raw).await?;

        Ok(())
    }
}
