use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

/// Image variant requested from the primary chapter source
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ImageQuality {
    Data,
    DataSaver,
}

impl ImageQuality {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ImageQuality::Data => "data",
            ImageQuality::DataSaver => "data-saver",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    pub(crate) path: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where clients reach the relay, also the prefix of rewritten image urls
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_create_database")]
    pub create_database: bool,
    /// Relay source name to upstream base url
    #[serde(default = "default_upstreams")]
    pub upstreams: BTreeMap<String, String>,
    #[serde(default = "default_image_user_agent")]
    pub image_user_agent: String,
    #[serde(default = "default_image_referer")]
    pub image_referer: String,
    #[serde(default = "default_translated_language")]
    pub translated_language: String,
    #[serde(default = "default_image_quality")]
    pub image_quality: ImageQuality,
    #[serde(default)]
    pub cache_negative_resolutions: bool,
    #[serde(default = "default_fallback_page_count")]
    pub fallback_page_count: usize,
    #[serde(default = "default_fallback_latency_ms")]
    pub fallback_latency_ms: u64,
    #[serde(default = "default_anilist_endpoint")]
    pub anilist_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: omniread_home().join("config.yml"),
            port: default_port(),
            relay_url: default_relay_url(),
            database_path: default_database_path(),
            create_database: default_create_database(),
            upstreams: default_upstreams(),
            image_user_agent: default_image_user_agent(),
            image_referer: default_image_referer(),
            translated_language: default_translated_language(),
            image_quality: default_image_quality(),
            cache_negative_resolutions: false,
            fallback_page_count: default_fallback_page_count(),
            fallback_latency_ms: default_fallback_latency_ms(),
            anilist_endpoint: default_anilist_endpoint(),
        }
    }
}

fn omniread_home() -> PathBuf {
    match std::env::var("OMNIREAD_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".omniread"),
    }
}

fn default_port() -> u16 {
    3000
}

fn default_relay_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_database_path() -> String {
    let path = omniread_home();
    if !path.exists() {
        let _ = std::fs::create_dir_all(&path);
    }
    path.join("omniread.db").display().to_string()
}

fn default_create_database() -> bool {
    true
}

fn default_upstreams() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("mangadex".to_string(), "https://api.mangadex.org".to_string()),
        ("anilist".to_string(), "https://graphql.anilist.co".to_string()),
    ])
}

fn default_image_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_image_referer() -> String {
    "https://mangadex.org/".to_string()
}

fn default_translated_language() -> String {
    "en".to_string()
}

fn default_image_quality() -> ImageQuality {
    ImageQuality::DataSaver
}

fn default_fallback_page_count() -> usize {
    10
}

fn default_fallback_latency_ms() -> u64 {
    500
}

fn default_anilist_endpoint() -> String {
    "https://graphql.anilist.co".to_string()
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => omniread_home().join("config.yml"),
        };

        match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("write default config at {:?}", cfg.path);
                Ok(cfg)
            }
        }
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    /// Base url the client uses for the primary chapter source
    pub fn mangadex_relay_url(&self) -> String {
        format!("{}/relay/mangadex", self.relay_url.trim_end_matches('/'))
    }
}
