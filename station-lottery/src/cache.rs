//! Caching layer for station provider responses.
//!
//! Line and station listings change a few times a year, so a nationwide
//! draw that keeps landing in the same prefectures would otherwise repeat
//! identical requests. Only responses are memoized: every attempt still
//! draws its own region and line.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::departure::StationDirectory;
use crate::domain::Station;
use crate::heartrails::HeartRailsClient;
use crate::lottery::{ProviderError, StationProvider};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of entries per listing kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 60 * 60),
            max_capacity: 2000,
        }
    }
}

/// A provider with cached line, station and name lookups.
///
/// Failed lookups are not cached.
pub struct CachedProvider<P> {
    upstream: P,
    lines: MokaCache<String, Arc<Vec<String>>>,
    stations: MokaCache<String, Arc<Vec<Station>>>,
    names: MokaCache<String, Arc<Vec<Station>>>,
}

/// HeartRails client with caching.
pub type CachedHeartRailsClient = CachedProvider<HeartRailsClient>;

impl<P> CachedProvider<P> {
    /// Wrap `upstream` with caches built from `config`.
    pub fn new(upstream: P, config: &CacheConfig) -> Self {
        Self {
            upstream,
            lines: build_cache(config),
            stations: build_cache(config),
            names: build_cache(config),
        }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn upstream(&self) -> &P {
        &self.upstream
    }

    /// Number of cached line listings.
    pub fn cached_regions(&self) -> u64 {
        self.lines.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.lines.invalidate_all();
        self.stations.invalidate_all();
        self.names.invalidate_all();
    }
}

fn build_cache<V: Clone + Send + Sync + 'static>(config: &CacheConfig) -> MokaCache<String, V> {
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

impl<P: StationProvider + Sync> CachedProvider<P> {
    async fn lines(&self, region: &str) -> Result<Arc<Vec<String>>, ProviderError> {
        if let Some(cached) = self.lines.get(region).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.upstream.list_lines(region).await?);
        self.lines.insert(region.to_string(), entry.clone()).await;
        Ok(entry)
    }

    async fn stations(&self, line: &str) -> Result<Arc<Vec<Station>>, ProviderError> {
        if let Some(cached) = self.stations.get(line).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.upstream.list_stations(line).await?);
        self.stations.insert(line.to_string(), entry.clone()).await;
        Ok(entry)
    }

    /// Warm the line cache for `regions`, `batch_size` lookups at a time.
    ///
    /// Returns the number of regions whose lines are now cached. Failures
    /// are logged and skipped.
    pub async fn prefetch_lines(&self, regions: &[String], batch_size: usize) -> usize {
        let mut warmed = 0;

        for batch in regions.chunks(batch_size.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|region| async move { (region, self.lines(region).await) })
                .collect();

            for (region, result) in join_all(futures).await {
                match result {
                    Ok(lines) => {
                        debug!(%region, lines = lines.len(), "prefetched lines");
                        warmed += 1;
                    }
                    Err(e) => {
                        warn!(%region, error = %e, "failed to prefetch lines");
                    }
                }
            }
        }

        warmed
    }
}

impl<P: StationProvider + Sync> StationProvider for CachedProvider<P> {
    async fn list_lines(&self, region: &str) -> Result<Vec<String>, ProviderError> {
        Ok(self.lines(region).await?.as_ref().clone())
    }

    async fn list_stations(&self, line: &str) -> Result<Vec<Station>, ProviderError> {
        Ok(self.stations(line).await?.as_ref().clone())
    }
}

impl<P: StationDirectory + Sync> StationDirectory for CachedProvider<P> {
    async fn find_stations(&self, name: &str) -> Result<Vec<Station>, ProviderError> {
        if let Some(cached) = self.names.get(name).await {
            return Ok(cached.as_ref().clone());
        }

        let found = self.upstream.find_stations(name).await?;
        self.names
            .insert(name.to_string(), Arc::new(found.clone()))
            .await;
        Ok(found)
    }
}
