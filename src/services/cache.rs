use crate::models::{Coordinate, DistanceResult};
use std::time::Duration;

/// Short-lived evaluation result cache.
///
/// Building data changes rarely but Overpass is rate-limited and slow, so
/// repeated checks of the same spot inside the TTL window are served from
/// memory. moka handles concurrent read/write and expiry; an abandoned
/// in-flight evaluation simply never inserts, so no partial result is ever
/// visible.
pub struct EvaluationCache {
    inner: moka::future::Cache<String, DistanceResult>,
}

impl EvaluationCache {
    pub fn new(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<DistanceResult> {
        let hit = self.inner.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, result: DistanceResult) {
        tracing::trace!("Cache set: {}", key);
        self.inner.insert(key, result).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for an evaluation result, with the coordinate rounded to four
    /// decimal places (~11 m grid) so GPS jitter between repeated checks
    /// of the same spot still hits.
    pub fn evaluation(coordinate: &Coordinate) -> String {
        format!("eval:{:.4}:{:.4}", coordinate.lat, coordinate.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(distance_feet: Option<u64>) -> DistanceResult {
        DistanceResult {
            distance_feet,
            buildings_scanned: 1,
            radius_m: 5_000,
        }
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = EvaluationCache::new(100, 60);

        cache.insert("eval:39.5296:-119.8138".to_string(), result(Some(4921))).await;

        let hit = cache.get("eval:39.5296:-119.8138").await.unwrap();
        assert_eq!(hit.distance_feet, Some(4921));
        assert!(cache.get("eval:40.0000:-120.0000").await.is_none());
    }

    #[tokio::test]
    async fn test_cache_stores_remote_results_too() {
        // "No building found" is a result worth caching, not an error
        let cache = EvaluationCache::new(100, 60);
        cache.insert("eval:41.0000:-117.0000".to_string(), result(None)).await;

        let hit = cache.get("eval:41.0000:-117.0000").await.unwrap();
        assert!(hit.distance_feet.is_none());
    }

    #[test]
    fn test_cache_key_rounding() {
        let a = Coordinate::new(39.52961234, -119.81379999).unwrap();
        let b = Coordinate::new(39.52959876, -119.81382222).unwrap();

        assert_eq!(CacheKey::evaluation(&a), "eval:39.5296:-119.8138");
        assert_eq!(CacheKey::evaluation(&a), CacheKey::evaluation(&b));
    }
}
