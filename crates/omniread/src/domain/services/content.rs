use omniread_lib::models::{Chapter, PageInfo, SourceTag, Work};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    repositories::{
        mapping::MappingRepository,
        source::{FallbackSourceRepository, PrimarySourceRepository, SourceRepositoryError},
    },
    services::resolver::{IdentityResolver, ResolveError},
};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("source error: {0}")]
    Source(#[from] SourceRepositoryError),
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("source {0} is not supported")]
    UnsupportedSource(SourceTag),
}

/// Chapters for a work together with the provider that produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterListing {
    pub origin: SourceTag,
    pub chapters: Vec<Chapter>,
}

/// Resolves a work on the primary source and falls back to the secondary provider
/// when that yields nothing.
pub struct ContentManager<M, P, F>
where
    M: MappingRepository,
    P: PrimarySourceRepository + Clone,
    F: FallbackSourceRepository,
{
    resolver: IdentityResolver<M, P>,
    primary: P,
    fallback: F,
}

impl<M, P, F> ContentManager<M, P, F>
where
    M: MappingRepository,
    P: PrimarySourceRepository + Clone,
    F: FallbackSourceRepository,
{
    pub fn new(mappings: M, primary: P, fallback: F) -> Self {
        Self {
            resolver: IdentityResolver::new(mappings, primary.clone()),
            primary,
            fallback,
        }
    }

    pub fn with_negative_cache(self, cache_negative: bool) -> Self {
        Self {
            resolver: self.resolver.with_negative_cache(cache_negative),
            ..self
        }
    }

    /// Never fails, an empty fallback listing means the work is unavailable
    pub async fn get_chapters(&self, work: &Work) -> ChapterListing {
        let title = work.display_title();

        match self.primary_chapters(title, work.id).await {
            Ok(chapters) if !chapters.is_empty() => {
                return ChapterListing {
                    origin: SourceTag::Mangadex,
                    chapters,
                };
            }
            Ok(_) => warn!("no chapters on primary source for {title:?}, switching to fallback"),
            Err(e) => warn!("primary source failed for {title:?}: {e}, switching to fallback"),
        }

        let chapters = match self.fallback.get_chapters(title).await {
            Ok(chapters) => chapters,
            Err(e) => {
                error!("fallback source failed for {title:?}: {e}");
                vec![]
            }
        };

        ChapterListing {
            origin: SourceTag::Fallback,
            chapters,
        }
    }

    async fn primary_chapters(&self, title: &str, work_id: i64) -> Result<Vec<Chapter>, ContentError> {
        let chapters = match self.resolver.resolve(title, work_id).await? {
            Some(source_id) => self.primary.get_chapters(&source_id).await?,
            None => vec![],
        };

        Ok(chapters)
    }

    pub async fn get_pages(&self, chapter: &Chapter) -> Result<Vec<PageInfo>, ContentError> {
        let pages = match chapter.source {
            SourceTag::Mangadex => self.primary.get_pages(&chapter.id).await,
            SourceTag::Fallback => self.fallback.get_pages(&chapter.id).await,
            SourceTag::Comick | SourceTag::Mangapill => {
                return Err(ContentError::UnsupportedSource(chapter.source));
            }
        };

        pages.map_err(|e| {
            error!("failed to get pages for {} from {}: {e}", chapter.id, chapter.source);
            ContentError::from(e)
        })
    }
}
