use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::{self, Body},
    extract::{Extension, Request},
    response::IntoResponse,
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, Response, StatusCode, header};
use thiserror::Error;

use super::error_response;

const DEFAULT_USER_AGENT: &str = "OmniRead/1.0";

const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Request headers that describe the client connection rather than the request
const STRIPPED_HEADERS: [header::HeaderName; 10] = [
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::CONTENT_LENGTH,
    header::ACCEPT_ENCODING,
    header::HOST,
];

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("body error: {0}")]
    BodyError(#[from] axum::Error),
    #[error("http error: {0}")]
    HttpError(#[from] http::Error),
    #[error("invalid upstream url: {0}")]
    InvalidUpstream(String),
}

/// `/relay/<source>/<rest>` split into `(source, rest)`
fn split_relay_path(path: &str) -> Option<(&str, &str)> {
    let path = path.strip_prefix("/relay/")?;
    Some(path.split_once('/').unwrap_or((path, "")))
}

fn upstream_url(base: &str, rest: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/{rest}", base.trim_end_matches('/'));
    if let Some(query) = query {
        url.push('?');
        url.push_str(query);
    }
    url
}

fn forwarded_headers(headers: &HeaderMap, host: HeaderValue) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(headers.len() + 1);
    for (name, value) in headers {
        if STRIPPED_HEADERS.contains(name) || name.as_str() == "keep-alive" {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }

    forwarded.insert(header::HOST, host);
    if !forwarded.contains_key(header::USER_AGENT) {
        forwarded.insert(
            header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );
    }

    forwarded
}

/// Forwards requests to named upstream apis
#[derive(Clone)]
pub struct Relay {
    client: reqwest::Client,
    upstreams: Arc<BTreeMap<String, String>>,
}

impl Relay {
    pub fn new(client: reqwest::Client, upstreams: BTreeMap<String, String>) -> Self {
        Self {
            client,
            upstreams: Arc::new(upstreams),
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<Response<Body>, RelayError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|e| RelayError::InvalidUpstream(format!("{url}: {e}")))?;
        let host = match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(RelayError::InvalidUpstream(url.to_string())),
        };
        let host = HeaderValue::from_str(&host)
            .map_err(|e| RelayError::InvalidUpstream(format!("{host}: {e}")))?;

        let body: Bytes = body::to_bytes(body, MAX_BODY_SIZE).await?;

        let res = self
            .client
            .request(method, parsed)
            .headers(forwarded_headers(headers, host))
            .body(body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Ok(error_response(status, format!("upstream error: {reason}")));
        }

        let content_type = res.headers().get(header::CONTENT_TYPE).cloned();
        let bytes = res.bytes().await?;

        let mut builder = Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        Ok(builder.body(Body::from(bytes))?)
    }
}

pub async fn forward(Extension(relay): Extension<Relay>, req: Request) -> impl IntoResponse {
    let (parts, body) = req.into_parts();

    let Some((source, rest)) = split_relay_path(parts.uri.path()) else {
        return error_response(StatusCode::NOT_FOUND, "relay endpoint not found");
    };
    let Some(base) = relay.upstreams.get(source) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("unknown relay source {source}"),
        );
    };

    let url = upstream_url(base, rest, parts.uri.query());
    debug!("relay {} {url}", parts.method);

    match relay.send(parts.method.clone(), &url, &parts.headers, body).await {
        Ok(res) => res,
        Err(e) => {
            error!("relay {source} failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to connect to {source}"),
            )
        }
    }
}
