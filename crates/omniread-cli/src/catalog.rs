use anyhow::anyhow;
use omniread_catalog::AniList;
use omniread_lib::prelude::Work;

use crate::print;

pub async fn work(anilist: &AniList, id: i64) -> Result<Work, anyhow::Error> {
    anilist
        .details(id)
        .await?
        .ok_or_else(|| anyhow!("work {id} not found"))
}

pub async fn trending(anilist: &AniList, page: i64, per_page: i64) -> Result<(), anyhow::Error> {
    print(&anilist.trending(page, per_page).await?)
}

pub async fn search(anilist: &AniList, query: &str) -> Result<(), anyhow::Error> {
    print(&anilist.search(query).await?)
}

pub async fn info(anilist: &AniList, id: i64) -> Result<(), anyhow::Error> {
    print(&work(anilist, id).await?)
}
