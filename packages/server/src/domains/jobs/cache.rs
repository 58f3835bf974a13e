//! Cached board snapshot shared by the read handlers.
//!
//! The board is small enough to hold in memory, so reads serve from one
//! shared snapshot and writes drop it. Refreshes are fenced by a generation
//! number: a refresh draws a ticket before its fetch starts, and may only
//! install its result if nothing newer (a later refresh or an invalidation)
//! has landed in the meantime. A slow fetch that loses the race is served to
//! its own caller at worst; it is never written back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::StoreError;

use super::models::job::JobPosting;
use super::store::JobStore;

#[derive(Default)]
struct CacheState {
    jobs: Option<Arc<Vec<JobPosting>>>,
    generation: u64,
}

/// Shared snapshot of every posting on the board.
pub struct BoardCache {
    store: JobStore,
    state: RwLock<CacheState>,
    tickets: AtomicU64,
}

impl BoardCache {
    pub fn new(store: JobStore) -> Self {
        Self {
            store,
            state: RwLock::new(CacheState::default()),
            tickets: AtomicU64::new(0),
        }
    }

    /// Current snapshot, fetching on first use or after an invalidation.
    pub async fn snapshot(&self) -> Result<Arc<Vec<JobPosting>>, StoreError> {
        if let Some(jobs) = self.state.read().await.jobs.clone() {
            return Ok(jobs);
        }
        self.refresh().await
    }

    /// Fetch the full board and install it, unless something newer landed
    /// while the fetch was in flight.
    pub async fn refresh(&self) -> Result<Arc<Vec<JobPosting>>, StoreError> {
        // Drawn before the fetch starts; later refreshes and invalidations
        // always draw a higher number.
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = Arc::new(self.store.list_all().await?);

        let mut state = self.state.write().await;
        if ticket > state.generation {
            state.generation = ticket;
            state.jobs = Some(fetched.clone());
            return Ok(fetched);
        }
        // Superseded. Serve whatever is newer, or this one-off fetch if the
        // cache was cleared, but never install a stale result.
        Ok(state.jobs.clone().unwrap_or(fetched))
    }

    /// Drop the snapshot after a write. Refreshes that drew their ticket
    /// before this point can no longer install their result.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        state.jobs = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JobCollection, MemoryCollection, RawJob};
    use async_trait::async_trait;
    use serde_json::{json, Map, Value};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Semaphore;

    /// Passes straight through to a `MemoryCollection`, except that the
    /// next `slow_reads` calls to `list_all` read their data and then park
    /// until the test adds a permit, like a response stuck on the wire.
    struct GatedReads {
        inner: Arc<MemoryCollection>,
        gate: Arc<Semaphore>,
        slow_reads: AtomicUsize,
    }

    impl GatedReads {
        fn new(inner: Arc<MemoryCollection>, slow_reads: usize) -> Self {
            Self {
                inner,
                gate: Arc::new(Semaphore::new(0)),
                slow_reads: AtomicUsize::new(slow_reads),
            }
        }

        fn release_one(&self) {
            self.gate.add_permits(1);
        }
    }

    #[async_trait]
    impl JobCollection for GatedReads {
        async fn list_all(&self) -> Result<Vec<RawJob>, StoreError> {
            let result = self.inner.list_all().await;
            let parked = self
                .slow_reads
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if parked {
                let _permit = self.gate.acquire().await.expect("gate closed");
            }
            result
        }

        async fn find(&self, id: &str) -> Result<Option<RawJob>, StoreError> {
            self.inner.find(id).await
        }

        async fn insert(&self, fields: Map<String, Value>) -> Result<String, StoreError> {
            self.inner.insert(fields).await
        }

        async fn merge(&self, id: &str, patch: Map<String, Value>) -> Result<bool, StoreError> {
            self.inner.merge(id, patch).await
        }

        async fn remove(&self, id: &str) -> Result<bool, StoreError> {
            self.inner.remove(id).await
        }

        async fn list_where_eq(&self, field: &str, value: &str) -> Result<Vec<RawJob>, StoreError> {
            self.inner.list_where_eq(field, value).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.inner.ping().await
        }
    }

    #[tokio::test]
    async fn snapshot_is_reused_until_invalidated() {
        let inner = Arc::new(MemoryCollection::new());
        inner.insert_with_id("01", json!({"jobTitle": "A"}));
        let cache = BoardCache::new(JobStore::new(inner.clone()));

        let first = cache.snapshot().await.unwrap();
        assert_eq!(first.len(), 1);

        // A direct write the cache has not been told about stays invisible.
        inner.insert_with_id("02", json!({"jobTitle": "B"}));
        let second = cache.snapshot().await.unwrap();
        assert_eq!(second.len(), 1);

        cache.invalidate().await;
        let third = cache.snapshot().await.unwrap();
        assert_eq!(third.len(), 2);
    }

    #[tokio::test]
    async fn slow_refresh_cannot_replace_a_newer_one() {
        let inner = Arc::new(MemoryCollection::new());
        inner.insert_with_id("01", json!({"jobTitle": "A"}));
        let gated = Arc::new(GatedReads::new(inner.clone(), 1));
        let cache = Arc::new(BoardCache::new(JobStore::new(gated.clone())));

        // First refresh reads one job, then parks mid-flight.
        let slow = tokio::spawn({
            let cache = cache.clone();
            async move { cache.refresh().await }
        });
        tokio::task::yield_now().await;

        // A second posting lands and a fast refresh observes it.
        inner.insert_with_id("02", json!({"jobTitle": "B"}));
        let fast = cache.refresh().await.unwrap();
        assert_eq!(fast.len(), 2);

        // The parked refresh completes with its stale single-job read. It
        // must hand back the newer snapshot and leave the cache alone.
        gated.release_one();
        let late = slow.await.unwrap().unwrap();
        assert_eq!(late.len(), 2);
        assert_eq!(cache.snapshot().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn refresh_in_flight_across_an_invalidation_is_not_installed() {
        let inner = Arc::new(MemoryCollection::new());
        inner.insert_with_id("01", json!({"jobTitle": "A"}));
        let gated = Arc::new(GatedReads::new(inner.clone(), 1));
        let cache = Arc::new(BoardCache::new(JobStore::new(gated.clone())));

        let slow = tokio::spawn({
            let cache = cache.clone();
            async move { cache.refresh().await }
        });
        tokio::task::yield_now().await;

        // The posting is deleted and the cache told so while the old read
        // is still on the wire.
        inner.remove("01").await.unwrap();
        cache.invalidate().await;
        gated.release_one();

        // The superseded caller gets its own stale read, once.
        let late = slow.await.unwrap().unwrap();
        assert_eq!(late.len(), 1);

        // But the cache refuses it: the next snapshot refetches and sees
        // the deletion.
        assert_eq!(cache.snapshot().await.unwrap().len(), 0);
    }
}
