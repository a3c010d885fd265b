use crate::models::School;
use crate::services::catalog::{CatalogError, SchoolCatalog};
use std::sync::Arc;
use std::time::Duration;

/// In-process cache of loaded catalog snapshots
///
/// Only the record set is cached; filtering and scoring always rerun.
pub struct CatalogCache {
    snapshots: moka::future::Cache<String, Arc<Vec<School>>>,
    ttl_secs: u64,
}

impl CatalogCache {
    pub fn new(ttl_secs: u64) -> Self {
        let snapshots = moka::future::CacheBuilder::new(16)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { snapshots, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Return the cached snapshot for this catalog, loading it on a miss
    ///
    /// Concurrent misses for the same catalog share a single load.
    pub async fn get_or_load(&self, catalog: &SchoolCatalog) -> Result<Arc<Vec<School>>, CatalogError> {
        let key = CacheKey::catalog(catalog.source_name());

        self.snapshots
            .try_get_with(key, async {
                tracing::trace!("Catalog cache miss: {}", catalog.source_name());
                let schools = catalog.list_all().await?;
                tracing::debug!("Cached {} schools from {} catalog", schools.len(), catalog.source_name());
                Ok::<_, CatalogError>(Arc::new(schools))
            })
            .await
            .map_err(CatalogError::from_shared)
    }

    /// Drop the snapshot so the next request reloads it
    pub async fn invalidate(&self, catalog: &SchoolCatalog) {
        self.snapshots
            .invalidate(&CacheKey::catalog(catalog.source_name()))
            .await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a catalog snapshot
    pub fn catalog(source: &str) -> String {
        format!("catalog:{}", source)
    }
}
