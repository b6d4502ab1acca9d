use omniread_lib::models::{LibraryEntry, LibraryStatus, Work};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::repositories::library::{LibraryRepository, LibraryRepositoryError};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] LibraryRepositoryError),
}

pub struct LibraryService<R>
where
    R: LibraryRepository,
{
    repo: R,
    // serializes load-modify-save of the library blob
    lock: Mutex<()>,
}

impl<R> LibraryService<R>
where
    R: LibraryRepository,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            lock: Mutex::new(()),
        }
    }

    pub async fn get_library(&self) -> Result<Vec<LibraryEntry>, LibraryError> {
        let library = self.repo.get_library().await?;

        Ok(library)
    }

    /// Adding a work that is already saved only changes its status
    pub async fn add_to_library(
        &self,
        work: Work,
        status: LibraryStatus,
    ) -> Result<LibraryEntry, LibraryError> {
        let _guard = self.lock.lock().await;

        let mut library = self.repo.get_library().await?;
        let entry = if let Some(entry) = library.iter_mut().find(|e| e.manga.id == work.id) {
            entry.status = status;
            entry.clone()
        } else {
            let entry = LibraryEntry {
                manga: work,
                status,
                added_at: chrono::Utc::now().timestamp_millis(),
            };
            library.push(entry.clone());
            entry
        };

        self.repo.save_library(&library).await?;

        Ok(entry)
    }

    /// Returns whether the work was in the library
    pub async fn remove_from_library(&self, work_id: i64) -> Result<bool, LibraryError> {
        let _guard = self.lock.lock().await;

        let mut library = self.repo.get_library().await?;
        let len = library.len();
        library.retain(|e| e.manga.id != work_id);

        if library.len() == len {
            return Ok(false);
        }

        self.repo.save_library(&library).await?;

        Ok(true)
    }

    pub async fn is_in_library(&self, work_id: i64) -> Result<bool, LibraryError> {
        let library = self.repo.get_library().await?;

        Ok(library.iter().any(|e| e.manga.id == work_id))
    }
}
