#[macro_use]
extern crate log;

use clap::Parser;
use omniread::{
    infrastructure::config::{Config, GLOBAL_CONFIG},
    presentation::ServerBuilder,
};

#[derive(Parser)]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
}

/// Filter for `OMNIREAD_LOG`, `RUST_LOG` takes precedence
fn omniread_log_filter(rust_log: Option<String>, omniread_log: Option<String>) -> Option<String> {
    match (rust_log, omniread_log) {
        (Some(_), _) => None,
        (None, Some(level)) => Some(format!("omniread={level},omniread_catalog={level}")),
        (None, None) => None,
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let mut logger = env_logger::Builder::from_default_env();
    let filter = omniread_log_filter(
        std::env::var("RUST_LOG").ok(),
        std::env::var("OMNIREAD_LOG").ok(),
    );
    if let Some(filter) = &filter {
        logger.parse_filters(filter);
    }
    logger.init();

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        info!("rust_log: {}", rust_log);
    } else if let Some(filter) = filter {
        info!("omniread_log: {}", filter);
    }

    let opts: Opts = Opts::parse();
    let config = GLOBAL_CONFIG.get_or_try_init(|| Config::open(opts.config))?;

    debug!("config: {:?}", config);

    let server_fut = ServerBuilder::new()
        .with_config(config.clone())
        .build()?
        .serve(([0, 0, 0, 0], config.port));

    tokio::select! {
        res = server_fut => {
            if let Err(e) = res {
                error!("server error: {e}");
            }
            info!("server shutdown");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl+c signal");
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_omniread_log_filter() {
        assert_eq!(
            omniread_log_filter(None, Some("debug".to_string())),
            Some("omniread=debug,omniread_catalog=debug".to_string())
        );
        assert_eq!(
            omniread_log_filter(Some("info".to_string()), Some("debug".to_string())),
            None
        );
        assert_eq!(omniread_log_filter(None, None), None);
    }
}
