#[cfg(feature = "embed")]
pub mod assets;
pub mod rest;

use std::{net::SocketAddr, time::Duration};

use anyhow::anyhow;
use axum::{
    Router,
    extract::Extension,
    routing::{any, get},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use self::rest::{
    fallback::{self, FallbackSource},
    health::health_check,
    image::{self, ImageProxy},
    relay::{self, Relay},
};
use crate::infrastructure::config::Config;

#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    client: Option<reqwest::Client>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(self, config: Config) -> Self {
        Self {
            config: Some(config),
            ..self
        }
    }

    pub fn with_client(self, client: reqwest::Client) -> Self {
        Self {
            client: Some(client),
            ..self
        }
    }

    pub fn build(self) -> Result<Server, anyhow::Error> {
        let config = self.config.ok_or_else(|| anyhow!("no config"))?;
        let client = self.client.unwrap_or_default();

        let relay = Relay::new(client.clone(), config.upstreams.clone());
        let image = ImageProxy::new(
            client,
            config.image_user_agent.clone(),
            config.image_referer.clone(),
        );
        let fallback = FallbackSource::new(Duration::from_millis(config.fallback_latency_ms));

        Ok(Server::new(relay, image, fallback))
    }
}

pub struct Server {
    router: Router,
}

impl Server {
    pub fn new(relay: Relay, image: ImageProxy, fallback: FallbackSource) -> Self {
        let router = Router::new()
            .route("/health", get(health_check))
            .route(
                "/relay/image",
                get(image::fetch_image).fallback(rest::method_not_allowed),
            )
            .route(
                "/relay/fallback/chapters",
                get(fallback::fetch_chapters).fallback(rest::method_not_allowed),
            )
            .route("/relay/{source}", any(relay::forward))
            .route("/relay/{source}/", any(relay::forward))
            .route("/relay/{source}/{*rest}", any(relay::forward))
            .fallback(rest::not_found)
            .layer(Extension(relay))
            .layer(Extension(image))
            .layer(Extension(fallback))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );

        Self { router }
    }

    pub async fn serve<A: Into<SocketAddr>>(self, addr: A) -> Result<(), anyhow::Error> {
        let listener = TcpListener::bind(addr.into()).await?;

        self.serve_with_listener(listener).await
    }

    pub async fn serve_with_listener(self, listener: TcpListener) -> Result<(), anyhow::Error> {
        info!("listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
