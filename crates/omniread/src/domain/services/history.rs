use omniread_lib::{HISTORY_LIMIT, models::ReadingProgress};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::repositories::history::{HistoryRepository, HistoryRepositoryError};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] HistoryRepositoryError),
}

pub struct HistoryService<R>
where
    R: HistoryRepository,
{
    repo: R,
    lock: Mutex<()>,
}

impl<R> HistoryService<R>
where
    R: HistoryRepository,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            lock: Mutex::new(()),
        }
    }

    /// Most recent first
    pub async fn get_history(&self) -> Result<Vec<ReadingProgress>, HistoryError> {
        let history = self.repo.get_history().await?;

        Ok(history)
    }

    pub async fn get_progress(&self, work_id: i64) -> Result<Option<ReadingProgress>, HistoryError> {
        let progress = self
            .repo
            .get_history()
            .await?
            .into_iter()
            .find(|p| p.manga_id == work_id);

        Ok(progress)
    }

    /// Moves the work to the front, dropping the oldest entries past the limit
    pub async fn update_history(&self, progress: ReadingProgress) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;

        let mut history = self.repo.get_history().await?;
        history.retain(|p| p.manga_id != progress.manga_id);
        history.insert(0, progress);
        history.truncate(HISTORY_LIMIT);

        self.repo.save_history(&history).await?;

        Ok(())
    }
}
