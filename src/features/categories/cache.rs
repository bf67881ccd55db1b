use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::features::categories::models::Category;

struct Snapshot {
    categories: Vec<Category>,
    fetched_at: Instant,
}

/// Time-bounded cache for the category listing.
///
/// Injected into [`super::services::CategoryService`] rather than living as
/// ambient process state. Entries expire after the configured TTL;
/// `invalidate` drops the snapshot immediately (to be called by whatever
/// surface edits categories). Staleness inside the TTL window is tolerated.
pub struct CategoryCache {
    snapshot: RwLock<Option<Snapshot>>,
    ttl: Duration,
}

impl CategoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            snapshot: RwLock::new(None),
            ttl,
        }
    }

    pub async fn get(&self) -> Option<Vec<Category>> {
        let snapshot = self.snapshot.read().await;
        match snapshot.as_ref() {
            Some(cached) if cached.fetched_at.elapsed() < self.ttl => {
                Some(cached.categories.clone())
            }
            _ => None,
        }
    }

    pub async fn put(&self, categories: Vec<Category>) {
        let mut snapshot = self.snapshot.write().await;
        *snapshot = Some(Snapshot {
            categories,
            fetched_at: Instant::now(),
        });
    }

    #[allow(dead_code)]
    pub async fn invalidate(&self) {
        let mut snapshot = self.snapshot.write().await;
        *snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_categories() -> Vec<Category> {
        vec![Category {
            id: 1,
            name: "Tools".to_string(),
            description: None,
        }]
    }

    #[tokio::test]
    async fn test_fresh_snapshot_is_returned() {
        let cache = CategoryCache::new(Duration::from_secs(60));
        assert!(cache.get().await.is_none());

        cache.put(sample_categories()).await;
        let cached = cache.get().await.expect("snapshot should be fresh");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "Tools");
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_dropped() {
        let cache = CategoryCache::new(Duration::ZERO);
        cache.put(sample_categories()).await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_clears_snapshot() {
        let cache = CategoryCache::new(Duration::from_secs(60));
        cache.put(sample_categories()).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }
}
