use omniread::{
    domain::services::{history::HistoryService, library::LibraryService},
    infrastructure::domain::repositories::{
        history::HistoryRepositoryImpl, library::LibraryRepositoryImpl, store::SqliteStore,
    },
};
use omniread_lib::prelude::{LibraryStatus, ReadingProgress, Work};

use crate::print;

pub async fn library(repo: LibraryRepositoryImpl<SqliteStore>) -> Result<(), anyhow::Error> {
    print(&LibraryService::new(repo).get_library().await?)
}

pub async fn add(
    repo: LibraryRepositoryImpl<SqliteStore>,
    work: Work,
    status: LibraryStatus,
) -> Result<(), anyhow::Error> {
    print(&LibraryService::new(repo).add_to_library(work, status).await?)
}

pub async fn remove(repo: LibraryRepositoryImpl<SqliteStore>, id: i64) -> Result<(), anyhow::Error> {
    if !LibraryService::new(repo).remove_from_library(id).await? {
        eprintln!("work {id} is not in the library");
    }

    Ok(())
}

pub async fn history(repo: HistoryRepositoryImpl<SqliteStore>) -> Result<(), anyhow::Error> {
    print(&HistoryService::new(repo).get_history().await?)
}

pub async fn record(
    repo: HistoryRepositoryImpl<SqliteStore>,
    id: i64,
    chapter_id: String,
    page: usize,
) -> Result<(), anyhow::Error> {
    let progress = ReadingProgress {
        manga_id: id,
        last_read_chapter_id: chapter_id,
        last_read_page: page,
        timestamp: chrono::Utc::now().timestamp_millis(),
    };

    let svc = HistoryService::new(repo);
    svc.update_history(progress).await?;

    print(&svc.get_progress(id).await?)
}
