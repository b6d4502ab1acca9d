use std::time::Duration;

use axum::{
    Json,
    extract::{Extension, Query},
};
use omniread_lib::models::{Chapter, SourceTag};
use serde::Deserialize;

const CHAPTER_COUNT: usize = 10;
const PAGES_PER_CHAPTER: u32 = 15;

#[derive(Debug, Deserialize)]
pub struct Params {
    #[serde(default)]
    title: String,
}

/// Stand-in for a scraped secondary source
#[derive(Clone)]
pub struct FallbackSource {
    latency: Duration,
}

impl FallbackSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

/// Chapters `count` down to 1, all released now
pub fn generate_chapters(count: usize) -> Vec<Chapter> {
    let now = chrono::Utc::now().to_rfc3339();

    (1..=count)
        .rev()
        .map(|n| Chapter {
            id: format!("fallback-{n}"),
            chapter_number: n.to_string(),
            volume_number: None,
            title: Some(format!("Backup Source Chapter {n}")),
            release_date: now.clone(),
            pages: Some(PAGES_PER_CHAPTER),
            source: SourceTag::Fallback,
            external_url: None,
        })
        .collect()
}

pub async fn fetch_chapters(
    Query(params): Query<Params>,
    Extension(source): Extension<FallbackSource>,
) -> Json<Vec<Chapter>> {
    debug!("fallback chapters for {:?}", params.title);
    tokio::time::sleep(source.latency).await;

    Json(generate_chapters(CHAPTER_COUNT))
}
