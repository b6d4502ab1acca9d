use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use omniread_lib::models::{Chapter, PageInfo, SourceTag};

use crate::domain::repositories::source::{
    FallbackSourceRepository, PrimarySourceRepository, SourceRepositoryError,
};

pub fn chapter(id: &str, number: &str, source: SourceTag) -> Chapter {
    Chapter {
        id: id.to_string(),
        chapter_number: number.to_string(),
        volume_number: None,
        title: None,
        release_date: "2024-01-01T00:00:00Z".to_string(),
        pages: None,
        source,
        external_url: None,
    }
}

fn failure() -> SourceRepositoryError {
    SourceRepositoryError::Other("connection refused".to_string())
}

#[derive(Clone, Default)]
pub struct FakePrimary {
    pub search_results: Vec<String>,
    pub chapters: Vec<Chapter>,
    pub pages: Vec<PageInfo>,
    pub fail_search: bool,
    pub fail_chapters: bool,
    pub fail_pages: bool,
    pub search_calls: Arc<AtomicUsize>,
    pub chapter_calls: Arc<AtomicUsize>,
}

impl FakePrimary {
    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrimarySourceRepository for FakePrimary {
    async fn search_manga(
        &self,
        _title: &str,
        _limit: usize,
    ) -> Result<Vec<String>, SourceRepositoryError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_search {
            return Err(failure());
        }
        Ok(self.search_results.clone())
    }

    async fn get_chapters(&self, _source_id: &str) -> Result<Vec<Chapter>, SourceRepositoryError> {
        self.chapter_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_chapters {
            return Err(failure());
        }
        Ok(self.chapters.clone())
    }

    async fn get_pages(&self, _chapter_id: &str) -> Result<Vec<PageInfo>, SourceRepositoryError> {
        if self.fail_pages {
            return Err(failure());
        }
        Ok(self.pages.clone())
    }
}

#[derive(Clone, Default)]
pub struct FakeFallback {
    pub chapters: Vec<Chapter>,
    pub fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl FakeFallback {
    pub fn with_chapters(count: usize) -> Self {
        Self {
            chapters: (1..=count)
                .rev()
                .map(|n| chapter(&format!("fallback-{n}"), &n.to_string(), SourceTag::Fallback))
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl FallbackSourceRepository for FakeFallback {
    async fn get_chapters(&self, _title: &str) -> Result<Vec<Chapter>, SourceRepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(failure());
        }
        Ok(self.chapters.clone())
    }

    async fn get_pages(&self, chapter_id: &str) -> Result<Vec<PageInfo>, SourceRepositoryError> {
        Ok((0..3)
            .map(|index| PageInfo {
                index,
                url: format!("placeholder://{chapter_id}/{index}"),
            })
            .collect())
    }
}
