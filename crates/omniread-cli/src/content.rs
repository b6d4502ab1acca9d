use omniread::{
    domain::services::content::ContentManager,
    infrastructure::{
        config::Config,
        domain::repositories::{
            fallback::FallbackRepositoryImpl, mangadex::MangaDexRepositoryImpl,
            mapping::MappingRepositoryImpl, store::SqliteStore,
        },
    },
};
use omniread_lib::prelude::{Chapter, SourceTag, Work};

use crate::print;

type Manager = ContentManager<
    MappingRepositoryImpl<SqliteStore>,
    MangaDexRepositoryImpl,
    FallbackRepositoryImpl,
>;

fn manager(config: &Config, store: SqliteStore) -> Manager {
    let client = reqwest::Client::new();

    ContentManager::new(
        MappingRepositoryImpl::new(store),
        MangaDexRepositoryImpl::new(client.clone(), config),
        FallbackRepositoryImpl::new(client, config),
    )
    .with_negative_cache(config.cache_negative_resolutions)
}

pub async fn chapters(config: &Config, store: SqliteStore, work: &Work) -> Result<(), anyhow::Error> {
    let listing = manager(config, store).get_chapters(work).await;
    if listing.chapters.is_empty() {
        eprintln!("no chapters available for {}", work.display_title());
    }

    print(&listing)
}

pub async fn pages(
    config: &Config,
    store: SqliteStore,
    chapter_id: String,
    source: SourceTag,
) -> Result<(), anyhow::Error> {
    let chapter = Chapter {
        id: chapter_id,
        chapter_number: String::new(),
        volume_number: None,
        title: None,
        release_date: String::new(),
        pages: None,
        source,
        external_url: None,
    };

    match manager(config, store).get_pages(&chapter).await {
        Ok(pages) if !pages.is_empty() => print(&pages),
        Ok(_) => {
            eprintln!("no pages");
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            eprintln!("no pages");
            Ok(())
        }
    }
}
