//! Read cache keyed by query identity
//!
//! Entries never expire. Each write path names the keys it makes stale and
//! calls [`QueryCache::invalidate`]; the next read refetches. Nothing is
//! invalidated implicitly, so a read racing a write may repopulate a key
//! with pre-write data until the next invalidation.

use dashmap::DashMap;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;

/// Identity of a cached list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Halls,
    Tables,
    AvailableTables,
    MenuItems,
    AvailableMenuItems,
    FeaturedMenuItems,
    MenuCategories,
    Orders,
    UnpaidOrders,
}

impl QueryKey {
    pub const ALL: [QueryKey; 9] = [
        QueryKey::Halls,
        QueryKey::Tables,
        QueryKey::AvailableTables,
        QueryKey::MenuItems,
        QueryKey::AvailableMenuItems,
        QueryKey::FeaturedMenuItems,
        QueryKey::MenuCategories,
        QueryKey::Orders,
        QueryKey::UnpaidOrders,
    ];

    /// Keys touched by any menu item write
    pub const MENU: [QueryKey; 4] = [
        QueryKey::MenuItems,
        QueryKey::AvailableMenuItems,
        QueryKey::FeaturedMenuItems,
        QueryKey::MenuCategories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Halls => "halls",
            Self::Tables => "tables",
            Self::AvailableTables => "available_tables",
            Self::MenuItems => "menu_items",
            Self::AvailableMenuItems => "available_menu_items",
            Self::FeaturedMenuItems => "featured_menu_items",
            Self::MenuCategories => "menu_categories",
            Self::Orders => "orders",
            Self::UnpaidOrders => "unpaid_orders",
        }
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Default)]
pub struct QueryCache {
    enabled: bool,
    entries: DashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the cached value for `key` or run `fetch` and store its result
    ///
    /// Errors are returned as-is and not cached. The map lock is not held
    /// across `fetch`.
    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.enabled {
            return fetch().await;
        }

        let cached = self.entries.get(&key).map(|e| Arc::clone(e.value()));
        if let Some(entry) = cached {
            match entry.downcast::<T>() {
                Ok(value) => {
                    tracing::trace!(key = key.as_str(), "Query cache hit");
                    return Ok((*value).clone());
                }
                Err(_) => {
                    tracing::warn!(key = key.as_str(), "Query cache type mismatch, refetching");
                }
            }
        }

        let value = fetch().await?;
        self.entries.insert(key, Arc::new(value.clone()));
        tracing::trace!(key = key.as_str(), "Query cache filled");
        Ok(value)
    }

    pub fn invalidate(&self, keys: &[QueryKey]) {
        for key in keys {
            self.entries.remove(key);
        }
        tracing::debug!(keys = ?keys.iter().map(QueryKey::as_str).collect::<Vec<_>>(), "Query cache invalidated");
    }

    pub fn invalidate_all(&self) {
        self.entries.clear();
        tracing::info!("Query cache cleared");
    }

    pub fn contains(&self, key: QueryKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn fetch_counted(counter: &AtomicUsize, value: Vec<i64>) -> Result<Vec<i64>, String> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = QueryCache::new(true);
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch(QueryKey::Halls, || fetch_counted(&calls, vec![1, 2]))
            .await
            .unwrap();
        // A stale-but-cached value wins over what the fetcher would return now
        let second = cache
            .get_or_fetch(QueryKey::Halls, || fetch_counted(&calls, vec![3]))
            .await
            .unwrap();

        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_only_named_keys() {
        let cache = QueryCache::new(true);
        let calls = AtomicUsize::new(0);
        for key in [QueryKey::Tables, QueryKey::AvailableTables, QueryKey::Orders] {
            cache
                .get_or_fetch(key, || fetch_counted(&calls, vec![]))
                .await
                .unwrap();
        }

        cache.invalidate(&[QueryKey::Tables, QueryKey::AvailableTables]);
        assert!(!cache.contains(QueryKey::Tables));
        assert!(!cache.contains(QueryKey::AvailableTables));
        assert!(cache.contains(QueryKey::Orders));

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new(true);
        let err: Result<Vec<i64>, String> = cache
            .get_or_fetch(QueryKey::Orders, || async { Err("boom".to_string()) })
            .await;
        assert!(err.is_err());
        assert!(!cache.contains(QueryKey::Orders));
    }

    #[tokio::test]
    async fn test_disabled_cache_always_fetches() {
        let cache = QueryCache::new(false);
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            cache
                .get_or_fetch(QueryKey::MenuItems, || fetch_counted(&calls, vec![1]))
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_type_mismatch_refetches() {
        let cache = QueryCache::new(true);
        cache
            .get_or_fetch(QueryKey::MenuCategories, || async {
                Ok::<_, String>(vec![1_i64])
            })
            .await
            .unwrap();
        let names: Vec<String> = cache
            .get_or_fetch(QueryKey::MenuCategories, || async {
                Ok::<_, String>(vec!["Mains".to_string()])
            })
            .await
            .unwrap();
        assert_eq!(names, vec!["Mains".to_string()]);
    }
}
