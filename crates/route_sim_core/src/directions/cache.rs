use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use tracing::debug;

use crate::geo::Coordinate;

use super::error::DirectionsError;
use super::{DirectionsProvider, RouteOption};

/// Coordinates are quantized to 1e-6 degrees (~0.1 m) for cache keys.
const KEY_SCALE: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RouteKey {
    start: (i64, i64),
    end: (i64, i64),
    option: RouteOption,
}

impl RouteKey {
    fn new(start: Coordinate, end: Coordinate, option: RouteOption) -> Self {
        let quantize = |c: Coordinate| {
            (
                (c.lat * KEY_SCALE).round() as i64,
                (c.lng * KEY_SCALE).round() as i64,
            )
        };
        Self {
            start: quantize(start),
            end: quantize(end),
            option,
        }
    }
}

/// LRU-cached wrapper around any [`DirectionsProvider`].
///
/// The key is directional. Only successful routes are cached; failures are
/// retried on the next request.
pub struct CachedDirectionsProvider {
    inner: Box<dyn DirectionsProvider>,
    cache: Mutex<LruCache<RouteKey, Vec<Coordinate>>>,
}

impl CachedDirectionsProvider {
    pub fn new(inner: Box<dyn DirectionsProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl DirectionsProvider for CachedDirectionsProvider {
    fn fetch(
        &self,
        start: Coordinate,
        end: Coordinate,
        option: RouteOption,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        let key = RouteKey::new(start, end, option);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(path) = cache.get(&key) {
                debug!("directions cache hit");
                return Ok(path.clone());
            }
        }

        let path = self.inner.fetch(start, end, option)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, path.clone());
        }
        Ok(path)
    }
}
