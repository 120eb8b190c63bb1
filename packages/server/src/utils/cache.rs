use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Logical query names shared by the read handlers and the write paths that
/// invalidate them.
pub mod keys {
    pub const MEMBERS: &str = "members";
    pub const LEGENDS: &str = "members:legends";
    pub const STATS: &str = "members:stats";
    pub const MARATHON_CITIES: &str = "members:marathon-cities";
    pub const BLOG_POSTS: &str = "blog-posts";
    pub const GEAR_PRODUCTS: &str = "gear-products";
    pub const SITE_IMAGES: &str = "site-images";

    pub fn site_images(section: &str) -> String {
        format!("{SITE_IMAGES}:{section}")
    }
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    stored_at: Instant,
}

/// Read-through cache for public list queries.
///
/// Entries are served until they are older than the staleness window or a
/// write drops them with [`QueryCache::invalidate_prefix`].
pub struct QueryCache {
    entries: DashMap<String, Entry>,
    stale_after: Duration,
    /// Bumped by every invalidation. A load that saw an older epoch must not
    /// store its result.
    epoch: AtomicU64,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            stale_after,
            epoch: AtomicU64::new(0),
        }
    }

    /// Fresh cached value for `key`, if any and of type `T`.
    pub fn get<T>(&self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.entries.get(key)?;
        if entry.stored_at.elapsed() > self.stale_after {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    pub fn insert<T>(&self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.entries.insert(
            key.into(),
            Entry {
                value: Arc::new(value),
                stored_at: Instant::now(),
            },
        );
    }

    /// Return the cached value for `key`, or run `load` and cache its result.
    /// Errors are returned as-is and never cached. A result is not cached
    /// when any invalidation ran while it was loading, since it may predate
    /// that write.
    pub async fn get_or_load<T, E, F, Fut>(&self, key: &str, load: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            tracing::trace!(key, "Query cache hit");
            return Ok(hit);
        }
        let started = self.epoch.load(Ordering::Acquire);
        let value = load().await?;
        self.insert(key, value.clone());
        // An invalidation that bumped the epoch before this point may already
        // have swept the map, so take the entry back out ourselves.
        if self.epoch.load(Ordering::Acquire) != started {
            self.entries.remove(key);
            tracing::debug!(key, "Cache invalidated during load, result not kept");
        }
        Ok(value)
    }

    /// Drop every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.entries.retain(|key, _| !key.starts_with(prefix));
        tracing::debug!(prefix, "Invalidated cached queries");
    }
}
