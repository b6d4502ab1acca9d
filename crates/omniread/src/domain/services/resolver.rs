use thiserror::Error;

use crate::domain::{
    entities::mapping::Mapping,
    repositories::{
        mapping::MappingRepository,
        source::{PrimarySourceRepository, SourceRepositoryError},
    },
};

pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("search failed: {0}")]
    SourceError(#[from] SourceRepositoryError),
}

/// Maps a catalog work id to the chapter source's id for the same work.
///
/// Positive results are cached forever. A work the source has no match for is only
/// remembered when `cache_negative` is set, otherwise every call searches again so a
/// later upload can still be picked up.
pub struct IdentityResolver<M, P>
where
    M: MappingRepository,
    P: PrimarySourceRepository,
{
    mappings: M,
    source: P,
    cache_negative: bool,
}

impl<M, P> IdentityResolver<M, P>
where
    M: MappingRepository,
    P: PrimarySourceRepository,
{
    pub fn new(mappings: M, source: P) -> Self {
        Self {
            mappings,
            source,
            cache_negative: false,
        }
    }

    pub fn with_negative_cache(self, cache_negative: bool) -> Self {
        Self {
            cache_negative,
            ..self
        }
    }

    pub async fn resolve(&self, title: &str, work_id: i64) -> Result<Option<String>, ResolveError> {
        match self.mappings.get_mapping(work_id).await {
            Ok(Some(Mapping::Found(source_id))) => {
                debug!("mapping cache hit for {work_id}: {source_id}");
                return Ok(Some(source_id));
            }
            Ok(Some(Mapping::NotFound)) if self.cache_negative => {
                debug!("negative mapping cache hit for {work_id}");
                return Ok(None);
            }
            Ok(_) => {}
            Err(e) => warn!("failed to read mapping for {work_id}: {e}"),
        }

        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        let source_id = self
            .source
            .search_manga(title, SEARCH_LIMIT)
            .await?
            .into_iter()
            .find(|id| !id.is_empty());

        let mapping = match &source_id {
            Some(source_id) => Mapping::Found(source_id.clone()),
            None if self.cache_negative => Mapping::NotFound,
            None => return Ok(None),
        };

        if let Err(e) = self.mappings.insert_mapping(work_id, &mapping).await {
            warn!("failed to save mapping for {work_id}: {e}");
        }

        Ok(source_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        domain::repositories::fake::FakePrimary,
        infrastructure::domain::repositories::{mapping::MappingRepositoryImpl, store::MemoryStore},
    };

    fn primary(results: &[&str]) -> FakePrimary {
        FakePrimary {
            search_results: results.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let source = primary(&["md-1", "md-2"]);
        let resolver =
            IdentityResolver::new(MappingRepositoryImpl::new(MemoryStore::new()), source.clone());

        let first = resolver.resolve("Chainsaw Man", 105778).await.unwrap();
        let second = resolver.resolve("Chainsaw Man", 105778).await.unwrap();

        assert_eq!(first, Some("md-1".to_string()));
        assert_eq!(first, second);
        assert_eq!(source.searches(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolve_keeps_cache_consistent() {
        let source = primary(&["md-7"]);
        let mappings = MappingRepositoryImpl::new(MemoryStore::new());
        let resolver = IdentityResolver::new(mappings.clone(), source.clone());

        let (a, b) = tokio::join!(
            resolver.resolve("Dandadan", 132029),
            resolver.resolve("Dandadan", 132029)
        );

        assert_eq!(a.unwrap(), Some("md-7".to_string()));
        assert_eq!(b.unwrap(), Some("md-7".to_string()));
        assert!(source.searches() <= 2);
        assert_eq!(
            mappings.get_mapping(132029).await.unwrap(),
            Some(Mapping::Found("md-7".to_string()))
        );

        resolver.resolve("Dandadan", 132029).await.unwrap();
        assert!(source.searches() <= 2);
    }

    #[tokio::test]
    async fn test_unmatched_work_is_searched_again() {
        let source = primary(&[]);
        let mappings = MappingRepositoryImpl::new(MemoryStore::new());
        let resolver = IdentityResolver::new(mappings.clone(), source.clone());

        assert_eq!(resolver.resolve("Unknown", 1).await.unwrap(), None);
        assert_eq!(resolver.resolve("Unknown", 1).await.unwrap(), None);

        assert_eq!(source.searches(), 2);
        assert_eq!(mappings.get_mapping(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_negative_cache() {
        let source = primary(&[]);
        let mappings = MappingRepositoryImpl::new(MemoryStore::new());
        let resolver =
            IdentityResolver::new(mappings.clone(), source.clone()).with_negative_cache(true);

        assert_eq!(resolver.resolve("Unknown", 1).await.unwrap(), None);
        assert_eq!(resolver.resolve("Unknown", 1).await.unwrap(), None);

        assert_eq!(source.searches(), 1);
        assert_eq!(mappings.get_mapping(1).await.unwrap(), Some(Mapping::NotFound));
    }

    #[tokio::test]
    async fn test_blank_search_ids_are_skipped() {
        let source = primary(&["", "md-3"]);
        let mappings = MappingRepositoryImpl::new(MemoryStore::new());
        let resolver = IdentityResolver::new(mappings.clone(), source.clone());

        assert_eq!(resolver.resolve("Blame!", 30044).await.unwrap(), Some("md-3".to_string()));
        assert_eq!(resolver.resolve("Blame!", 30044).await.unwrap(), Some("md-3".to_string()));

        assert_eq!(source.searches(), 1);
        assert_eq!(
            mappings.get_mapping(30044).await.unwrap(),
            Some(Mapping::Found("md-3".to_string()))
        );
    }

    #[tokio::test]
    async fn test_only_blank_search_ids_is_unmatched() {
        let source = primary(&[""]);
        let mappings = MappingRepositoryImpl::new(MemoryStore::new());
        let resolver = IdentityResolver::new(mappings.clone(), source.clone());

        assert_eq!(resolver.resolve("Blame!", 30044).await.unwrap(), None);
        assert_eq!(mappings.get_mapping(30044).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_title_skips_search() {
        let source = primary(&["md-1"]);
        let resolver =
            IdentityResolver::new(MappingRepositoryImpl::new(MemoryStore::new()), source.clone());

        assert_eq!(resolver.resolve("  ", 5).await.unwrap(), None);
        assert_eq!(source.searches(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_is_not_cached() {
        let source = FakePrimary {
            fail_search: true,
            ..Default::default()
        };
        let mappings = MappingRepositoryImpl::new(MemoryStore::new());
        let resolver = IdentityResolver::new(mappings.clone(), source).with_negative_cache(true);

        assert!(resolver.resolve("One Piece", 30013).await.is_err());
        assert_eq!(mappings.get_mapping(30013).await.unwrap(), None);
    }
}
