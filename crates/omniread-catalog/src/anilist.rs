use omniread_lib::models::Work;
use reqwest::{StatusCode, header};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;

use crate::Error;

pub const ENDPOINT: &str = "https://graphql.anilist.co";

const MEDIA_FIELDS: &str = "
    id
    idMal
    title {
      romaji
      english
      native
    }
    description
    coverImage {
      extraLarge
      large
      color
    }
    bannerImage
    format
    status
    chapters
    genres
    averageScore
    popularity
    startDate {
      year
      month
      day
    }
";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: MediaPage,
}

#[derive(Debug, Deserialize)]
struct MediaPage {
    media: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    #[serde(rename = "Media")]
    media: Option<Work>,
}

fn into_data<T>(res: GraphQlResponse<T>) -> Result<T, Error> {
    if !res.errors.is_empty() {
        let message = res
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(Error::GraphQl(message));
    }

    res.data.ok_or(Error::EmptyResponse)
}

/// Read-only client for the AniList GraphQL catalog
#[derive(Debug, Clone)]
pub struct AniList {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for AniList {
    fn default() -> Self {
        Self::new(ENDPOINT)
    }
}

impl AniList {
    /// `endpoint` is either the catalog itself or a relay path forwarding to it
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn trending(&self, page: i64, per_page: i64) -> Result<Vec<Work>, Error> {
        let query = format!(
            "query ($page: Int, $perPage: Int) {{
              Page (page: $page, perPage: $perPage) {{
                media (sort: TRENDING_DESC, type: MANGA, isAdult: false) {{ {MEDIA_FIELDS} }}
              }}
            }}"
        );

        let data: PageData = self
            .post_graphql(&json!({
                "query": query,
                "variables": { "page": page, "perPage": per_page }
            }))
            .await?
            .ok_or(Error::EmptyResponse)?;

        Ok(data.page.media)
    }

    pub async fn search(&self, search: &str) -> Result<Vec<Work>, Error> {
        let query = format!(
            "query ($search: String) {{
              Page (page: 1, perPage: 20) {{
                media (search: $search, type: MANGA, isAdult: false, sort: POPULARITY_DESC) {{ {MEDIA_FIELDS} }}
              }}
            }}"
        );

        let data: PageData = self
            .post_graphql(&json!({
                "query": query,
                "variables": { "search": search }
            }))
            .await?
            .ok_or(Error::EmptyResponse)?;

        Ok(data.page.media)
    }

    pub async fn details(&self, id: i64) -> Result<Option<Work>, Error> {
        let query = format!(
            "query ($id: Int) {{
              Media (id: $id, type: MANGA) {{ {MEDIA_FIELDS} }}
            }}"
        );

        let data: Option<MediaData> = self
            .post_graphql(&json!({
                "query": query,
                "variables": { "id": id }
            }))
            .await?;

        Ok(data.and_then(|data| data.media))
    }

    /// `Ok(None)` when the catalog answers 404
    async fn post_graphql<T: DeserializeOwned>(
        &self,
        body: &serde_json::Value,
    ) -> Result<Option<T>, Error> {
        let res = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        if res.status() == StatusCode::NOT_FOUND {
            debug!("catalog returned 404 for {}", self.endpoint);
            return Ok(None);
        }

        let res = res
            .error_for_status()?
            .json::<GraphQlResponse<T>>()
            .await?;

        into_data(res).map(Some)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_page_response() {
        let raw = r#"{
            "data": {
                "Page": {
                    "media": [
                        {"id": 30013, "title": {"romaji": "One Piece", "english": "One Piece", "native": null}, "genres": ["Adventure"]},
                        {"id": 105778, "title": {"romaji": "Chainsaw Man", "english": "Chainsaw Man", "native": null}, "genres": []}
                    ]
                }
            }
        }"#;

        let res: GraphQlResponse<PageData> = serde_json::from_str(raw).unwrap();
        let data = into_data(res).unwrap();

        let ids: Vec<i64> = data.page.media.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![30013, 105778]);
        assert_eq!(data.page.media[1].display_title(), "Chainsaw Man");
    }

    #[test]
    fn test_graphql_errors() {
        let raw = r#"{
            "data": null,
            "errors": [{"message": "Too Many Requests.", "status": 429}]
        }"#;

        let res: GraphQlResponse<MediaData> = serde_json::from_str(raw).unwrap();
        match into_data(res) {
            Err(Error::GraphQl(message)) => assert_eq!(message, "Too Many Requests."),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_media() {
        let res: GraphQlResponse<MediaData> =
            serde_json::from_str(r#"{"data": {"Media": null}}"#).unwrap();

        assert!(into_data(res).unwrap().media.is_none());
    }
}
