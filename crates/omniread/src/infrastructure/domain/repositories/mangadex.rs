use async_trait::async_trait;
use itertools::Itertools;
use omniread_lib::models::{Chapter, PageInfo, SourceTag, sort_chapters};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    domain::repositories::source::{PrimarySourceRepository, SourceRepositoryError},
    infrastructure::config::{Config, ImageQuality},
};

pub const FEED_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<MangaData>,
}

#[derive(Debug, Deserialize)]
struct MangaData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    data: Vec<ChapterData>,
}

#[derive(Debug, Deserialize)]
struct ChapterData {
    id: String,
    attributes: ChapterAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChapterAttributes {
    chapter: Option<String>,
    volume: Option<String>,
    title: Option<String>,
    publish_at: String,
    #[serde(default)]
    pages: Option<u32>,
    #[serde(default)]
    external_url: Option<String>,
}

impl From<ChapterData> for Chapter {
    fn from(ch: ChapterData) -> Self {
        Self {
            id: ch.id,
            chapter_number: ch.attributes.chapter.unwrap_or_default(),
            volume_number: ch.attributes.volume,
            title: ch.attributes.title.filter(|t| !t.is_empty()),
            release_date: ch.attributes.publish_at,
            pages: ch.attributes.pages,
            source: SourceTag::Mangadex,
            external_url: ch.attributes.external_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtHomeResponse {
    base_url: String,
    chapter: AtHomeChapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AtHomeChapter {
    hash: String,
    data: Vec<String>,
    data_saver: Vec<String>,
}

/// Route `url` through the relay image endpoint
pub fn relay_image_url(relay_url: &str, url: &str) -> Result<String, SourceRepositoryError> {
    let query = serde_urlencoded::to_string([("url", url)])
        .map_err(|e| SourceRepositoryError::Other(format!("{e}")))?;

    Ok(format!("{}/relay/image?{query}", relay_url.trim_end_matches('/')))
}

fn feed_into_chapters(feed: FeedResponse) -> Vec<Chapter> {
    let mut chapters = feed
        .data
        .into_iter()
        .unique_by(|ch| ch.id.clone())
        .map(Chapter::from)
        .collect::<Vec<Chapter>>();

    sort_chapters(&mut chapters);

    chapters
}

/// File order is page order
fn at_home_into_pages(
    at_home: AtHomeResponse,
    quality: ImageQuality,
    relay_url: &str,
) -> Result<Vec<PageInfo>, SourceRepositoryError> {
    let AtHomeResponse { base_url, chapter } = at_home;
    let files = match quality {
        ImageQuality::Data => chapter.data,
        ImageQuality::DataSaver => chapter.data_saver,
    };

    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let external = format!(
                "{}/{}/{}/{}",
                base_url.trim_end_matches('/'),
                quality.path_segment(),
                chapter.hash,
                file
            );

            Ok(PageInfo {
                index,
                url: relay_image_url(relay_url, &external)?,
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct MangaDexRepositoryImpl {
    client: reqwest::Client,
    base_url: String,
    relay_url: String,
    language: String,
    quality: ImageQuality,
}

impl MangaDexRepositoryImpl {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.mangadex_relay_url(),
            relay_url: config.relay_url.clone(),
            language: config.translated_language.clone(),
            quality: config.image_quality,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SourceRepositoryError> {
        let url = format!("{}{path}", self.base_url);
        debug!("get {url}");

        let bytes = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PrimarySourceRepository for MangaDexRepositoryImpl {
    async fn search_manga(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<Vec<String>, SourceRepositoryError> {
        let limit = limit.to_string();
        let res: SearchResponse = self
            .get(
                "/manga",
                &[
                    ("title", title),
                    ("limit", limit.as_str()),
                    ("order[relevance]", "desc"),
                ],
            )
            .await?;

        Ok(res.data.into_iter().map(|manga| manga.id).collect())
    }

    async fn get_chapters(&self, source_id: &str) -> Result<Vec<Chapter>, SourceRepositoryError> {
        let limit = FEED_LIMIT.to_string();
        let feed: FeedResponse = self
            .get(
                &format!("/manga/{source_id}/feed"),
                &[
                    ("limit", limit.as_str()),
                    ("translatedLanguage[]", self.language.as_str()),
                    ("order[chapter]", "desc"),
                ],
            )
            .await?;

        Ok(feed_into_chapters(feed))
    }

    async fn get_pages(&self, chapter_id: &str) -> Result<Vec<PageInfo>, SourceRepositoryError> {
        let at_home: AtHomeResponse = self
            .get(&format!("/at-home/server/{chapter_id}"), &[])
            .await?;

        at_home_into_pages(at_home, self.quality, &self.relay_url)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn feed_json(numbers: &[(&str, Option<&str>)]) -> String {
        let data = numbers
            .iter()
            .map(|(id, number)| {
                serde_json::json!({
                    "id": id,
                    "type": "chapter",
                    "attributes": {
                        "volume": null,
                        "chapter": number,
                        "title": "",
                        "translatedLanguage": "en",
                        "publishAt": "2023-02-01T10:00:00+00:00",
                        "pages": 20
                    }
                })
            })
            .collect::<Vec<_>>();

        serde_json::json!({ "result": "ok", "data": data }).to_string()
    }

    #[test]
    fn test_feed_is_normalized_and_sorted() {
        let raw = feed_json(&[("c3", Some("3")), ("c1", Some("1")), ("c25", Some("2.5"))]);
        let feed: FeedResponse = serde_json::from_str(&raw).unwrap();

        let chapters = feed_into_chapters(feed);
        let numbers: Vec<&str> = chapters.iter().map(|c| c.chapter_number.as_str()).collect();

        assert_eq!(numbers, vec!["3", "2.5", "1"]);
        assert!(chapters.iter().all(|c| c.source == SourceTag::Mangadex));
        assert!(chapters.iter().all(|c| c.title.is_none()));
    }

    #[test]
    fn test_feed_oneshot_and_duplicates() {
        let raw = feed_json(&[("os", None), ("c2", Some("2")), ("c2", Some("2"))]);
        let feed: FeedResponse = serde_json::from_str(&raw).unwrap();

        let chapters = feed_into_chapters(feed);
        let ids: Vec<&str> = chapters.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["c2", "os"]);
        assert_eq!(chapters[1].chapter_number, "");
    }

    #[test]
    fn test_feed_shape_mismatch_fails() {
        let raw = r#"{"result": "ok", "data": [{"id": "c1", "attributes": {"chapter": "1"}}]}"#;
        assert!(serde_json::from_str::<FeedResponse>(raw).is_err());
    }

    #[test]
    fn test_pages_are_relay_rewritten_in_file_order() {
        let files = (1..=24).map(|i| format!("x{i}-abc.jpg")).collect::<Vec<_>>();
        let raw = serde_json::json!({
            "result": "ok",
            "baseUrl": "https://uploads.mangadex.org",
            "chapter": {
                "hash": "3303dd03ac8d27452cce3f2a882e94b2",
                "data": [],
                "dataSaver": files
            }
        })
        .to_string();
        let at_home: AtHomeResponse = serde_json::from_str(&raw).unwrap();

        let pages =
            at_home_into_pages(at_home, ImageQuality::DataSaver, "http://localhost:3000").unwrap();

        assert_eq!(pages.len(), 24);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.index, i);
            assert!(page.url.starts_with("http://localhost:3000/relay/image?url="));
        }
        assert_eq!(
            pages[0].url,
            "http://localhost:3000/relay/image?url=https%3A%2F%2Fuploads.mangadex.org%2Fdata-saver%2F3303dd03ac8d27452cce3f2a882e94b2%2Fx1-abc.jpg"
        );
    }

    #[test]
    fn test_pages_full_quality_uses_data_files() {
        let raw = r#"{
            "baseUrl": "https://cmdxd98sb0x3yprd.mangadex.network/",
            "chapter": {"hash": "h", "data": ["a.png", "b.png"], "dataSaver": ["a.jpg"]}
        }"#;
        let at_home: AtHomeResponse = serde_json::from_str(raw).unwrap();

        let pages = at_home_into_pages(at_home, ImageQuality::Data, "").unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(
            pages[1].url,
            "/relay/image?url=https%3A%2F%2Fcmdxd98sb0x3yprd.mangadex.network%2Fdata%2Fh%2Fb.png"
        );
    }
}
