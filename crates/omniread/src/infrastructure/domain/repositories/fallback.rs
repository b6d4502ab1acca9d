use async_trait::async_trait;
use omniread_lib::models::{Chapter, PageInfo, SourceTag, sort_chapters};

use crate::{
    domain::repositories::source::{FallbackSourceRepository, SourceRepositoryError},
    infrastructure::config::Config,
};

const PLACEHOLDER_URL: &str = "https://picsum.photos/600/900";

/// Deterministic stand-in pages, one per index
pub fn placeholder_pages(chapter_id: &str, count: usize) -> Vec<PageInfo> {
    (0..count.max(1))
        .map(|index| PageInfo {
            index,
            url: format!("{PLACEHOLDER_URL}?random={chapter_id}-{index}"),
        })
        .collect()
}

#[derive(Clone)]
pub struct FallbackRepositoryImpl {
    client: reqwest::Client,
    url: String,
    page_count: usize,
}

impl FallbackRepositoryImpl {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: format!(
                "{}/relay/fallback/chapters",
                config.relay_url.trim_end_matches('/')
            ),
            page_count: config.fallback_page_count,
        }
    }
}

#[async_trait]
impl FallbackSourceRepository for FallbackRepositoryImpl {
    async fn get_chapters(&self, title: &str) -> Result<Vec<Chapter>, SourceRepositoryError> {
        let bytes = self
            .client
            .get(&self.url)
            .query(&[("title", title)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let mut chapters: Vec<Chapter> = serde_json::from_slice(&bytes)?;
        for chapter in chapters.iter_mut() {
            chapter.source = SourceTag::Fallback;
        }
        sort_chapters(&mut chapters);

        Ok(chapters)
    }

    async fn get_pages(&self, chapter_id: &str) -> Result<Vec<PageInfo>, SourceRepositoryError> {
        Ok(placeholder_pages(chapter_id, self.page_count))
    }
}
