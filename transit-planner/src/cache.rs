//! Caching layer for geocoding lookups.
//!
//! Public geocoders are rate limited and the same few addresses (home,
//! work, stations) get asked about repeatedly. Successful lookups are cached
//! by query; failures are not, so a transient error does not stick.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::geocode::{AddressQuery, GeocodeError, Geocoder, Location};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches its successful answers.
pub struct CachedGeocoder<G> {
    inner: G,
    locations: MokaCache<AddressQuery, Location>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let locations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, locations }
    }

    /// Number of cached entries (approximate, for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.locations.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.locations.invalidate_all();
    }
}

impl<G: Geocoder + Sync> Geocoder for CachedGeocoder<G> {
    async fn locate(&self, query: &AddressQuery) -> Result<Location, GeocodeError> {
        // Try cache first
        if let Some(cached) = self.locations.get(query).await {
            return Ok(cached);
        }

        let location = self.inner.locate(query).await?;
        self.locations.insert(query.clone(), location.clone()).await;

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every query with the same point and counts calls.
    struct CountingGeocoder {
        calls: AtomicUsize,
        known_city: &'static str,
    }

    impl CountingGeocoder {
        fn new(known_city: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                known_city,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Geocoder for CountingGeocoder {
        async fn locate(&self, query: &AddressQuery) -> Result<Location, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.city != self.known_city {
                return Err(GeocodeError::NotFound(query.to_string()));
            }
            Ok(Location {
                coordinate: Coordinate::new(40.4169, -3.7035).unwrap(),
                display_name: format!("{query}"),
            })
        }
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let cached = CachedGeocoder::new(CountingGeocoder::new("Madrid"), &CacheConfig::default());
        let query = AddressQuery::new("1", "Puerta del Sol", "Madrid");

        let first = cached.locate(&query).await.unwrap();
        let second = cached.locate(&query).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner.calls(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cached = CachedGeocoder::new(CountingGeocoder::new("Madrid"), &CacheConfig::default());
        let query = AddressQuery::new("1", "Rue de Rivoli", "Paris");

        assert!(cached.locate(&query).await.unwrap_err().is_not_found());
        assert!(cached.locate(&query).await.unwrap_err().is_not_found());
        assert_eq!(cached.inner.calls(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedGeocoder::new(CountingGeocoder::new("Madrid"), &CacheConfig::default());
        let query = AddressQuery::new("1", "Puerta del Sol", "Madrid");

        cached.locate(&query).await.unwrap();
        cached.invalidate_all();
        cached.locate(&query).await.unwrap();

        assert_eq!(cached.inner.calls(), 2);
    }
}
