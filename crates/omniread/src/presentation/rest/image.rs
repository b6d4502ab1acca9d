use axum::{
    body::Body,
    extract::{Extension, Query},
    http::{Response, StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

use super::{error_response, relay::RelayError};

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, Deserialize)]
pub struct Params {
    url: Option<String>,
}

/// Fetches images from hosts that reject requests without a browser-like origin
#[derive(Clone)]
pub struct ImageProxy {
    client: reqwest::Client,
    user_agent: String,
    referer: String,
}

impl ImageProxy {
    pub fn new(client: reqwest::Client, user_agent: String, referer: String) -> Self {
        Self {
            client,
            user_agent,
            referer,
        }
    }

    async fn fetch(&self, url: &str) -> Result<Response<Body>, RelayError> {
        let res = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::REFERER, &self.referer)
            .send()
            .await?
            .error_for_status()?;

        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| header::HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let res = Response::builder()
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "public, max-age=86400")
            .body(Body::from_stream(res.bytes_stream()))?;

        Ok(res)
    }
}

pub async fn fetch_image(
    Query(params): Query<Params>,
    Extension(proxy): Extension<ImageProxy>,
) -> impl IntoResponse {
    let Some(url) = params.url.filter(|url| !url.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "url is required");
    };

    match proxy.fetch(&url).await {
        Ok(res) => res,
        Err(e) => {
            error!("failed to fetch image {url}: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "error fetching image")
        }
    }
}
