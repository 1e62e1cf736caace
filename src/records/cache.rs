// src/records/cache.rs

//! Time-bounded snapshot cache in front of a record store.
//!
//! List reads are served from memory for `ttl` after a successful fetch.
//! The store pushes no invalidation, so data may be up to `ttl` stale.
//! Writes made through the cache drop both snapshots once they succeed.
//! A fetch that started before such a write is returned to its caller but
//! never cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::Result;
use crate::models::{CasinoRecord, GameRecord};
use crate::records::{Clock, RecordStore, SystemClock};

/// Default snapshot lifetime (5 minutes).
pub const DEFAULT_TTL_SECS: i64 = 300;

/// A list fetched from the store and when it was fetched.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub records: Arc<Vec<T>>,
    pub fetched_at: DateTime<Utc>,
}

type Slot<T> = Mutex<Option<Snapshot<T>>>;

/// Caching decorator for any [`RecordStore`].
pub struct CachedStore<S, C = SystemClock> {
    inner: S,
    clock: C,
    ttl: TimeDelta,
    /// Bumped by every invalidation
    generation: AtomicU64,
    casinos: Slot<CasinoRecord>,
    games: Slot<GameRecord>,
}

impl<S: RecordStore> CachedStore<S> {
    /// Wrap a store with the wall clock and the default TTL.
    pub fn new(inner: S) -> Self {
        Self::with_clock(inner, SystemClock, TimeDelta::seconds(DEFAULT_TTL_SECS))
    }
}

impl<S: RecordStore, C: Clock> CachedStore<S, C> {
    pub fn with_clock(inner: S, clock: C, ttl: TimeDelta) -> Self {
        Self {
            inner,
            clock,
            ttl,
            generation: AtomicU64::new(0),
            casinos: Mutex::new(None),
            games: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Last fetched casino snapshot, fresh or not, without any I/O.
    pub fn last_snapshot(&self) -> Option<Snapshot<CasinoRecord>> {
        self.casinos
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop both cached lists.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.casinos.lock().unwrap_or_else(PoisonError::into_inner) = None;
        *self.games.lock().unwrap_or_else(PoisonError::into_inner) = None;
        log::debug!("Record cache invalidated");
    }

    fn fresh<T>(&self, slot: &Slot<T>) -> Option<Arc<Vec<T>>> {
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|s| self.clock.now() - s.fetched_at < self.ttl)
            .map(|s| Arc::clone(&s.records))
    }

    /// Cache a fetch unless an invalidation happened since `generation`.
    fn store<T>(&self, slot: &Slot<T>, records: Vec<T>, generation: u64) -> Arc<Vec<T>> {
        let records = Arc::new(records);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) == generation {
            *guard = Some(Snapshot {
                records: Arc::clone(&records),
                fetched_at: self.clock.now(),
            });
        } else {
            log::debug!("Discarding list fetched before a write");
        }
        records
    }

    async fn casinos_snapshot(&self) -> Result<Arc<Vec<CasinoRecord>>> {
        if let Some(hit) = self.fresh(&self.casinos) {
            log::debug!("Casino cache hit ({} records)", hit.len());
            return Ok(hit);
        }
        let generation = self.generation.load(Ordering::SeqCst);
        let fetched = self.inner.fetch_all_casinos().await?;
        log::info!("Fetched {} casinos from record store", fetched.len());
        Ok(self.store(&self.casinos, fetched, generation))
    }

    async fn games_snapshot(&self) -> Result<Arc<Vec<GameRecord>>> {
        if let Some(hit) = self.fresh(&self.games) {
            log::debug!("Game cache hit ({} records)", hit.len());
            return Ok(hit);
        }
        let generation = self.generation.load(Ordering::SeqCst);
        let fetched = self.inner.fetch_all_games().await?;
        log::info!("Fetched {} games from record store", fetched.len());
        Ok(self.store(&self.games, fetched, generation))
    }
}

#[async_trait]
impl<S: RecordStore, C: Clock> RecordStore for CachedStore<S, C> {
    async fn fetch_all_casinos(&self) -> Result<Vec<CasinoRecord>> {
        Ok(self.casinos_snapshot().await?.as_ref().clone())
    }

    async fn fetch_casino_by_id(&self, id: &str) -> Result<Option<CasinoRecord>> {
        if let Some(hit) = self
            .fresh(&self.casinos)
            .and_then(|all| all.iter().find(|c| c.id == id).cloned())
        {
            return Ok(Some(hit));
        }
        self.inner.fetch_casino_by_id(id).await
    }

    async fn fetch_casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>> {
        if let Some(hit) = self
            .fresh(&self.casinos)
            .and_then(|all| all.iter().find(|c| c.slug == slug).cloned())
        {
            return Ok(Some(hit));
        }
        self.inner.fetch_casino_by_slug(slug).await
    }

    async fn fetch_all_games(&self) -> Result<Vec<GameRecord>> {
        Ok(self.games_snapshot().await?.as_ref().clone())
    }

    async fn fetch_game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>> {
        if let Some(hit) = self
            .fresh(&self.games)
            .and_then(|all| all.iter().find(|g| g.slug == slug).cloned())
        {
            return Ok(Some(hit));
        }
        self.inner.fetch_game_by_slug(slug).await
    }

    async fn upsert_casino(&self, casino: &CasinoRecord) -> Result<CasinoRecord> {
        let stored = self.inner.upsert_casino(casino).await?;
        self.invalidate();
        Ok(stored)
    }

    async fn delete_casino(&self, id: &str) -> Result<()> {
        self.inner.delete_casino(id).await?;
        self.invalidate();
        Ok(())
    }

    async fn upsert_game(&self, game: &GameRecord) -> Result<GameRecord> {
        let stored = self.inner.upsert_game(game).await?;
        self.invalidate();
        Ok(stored)
    }

    async fn delete_game(&self, id: &str) -> Result<()> {
        self.inner.delete_game(id).await?;
        self.invalidate();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;
    use crate::error::AppError;
    use crate::records::ManualClock;

    /// In-memory store that counts list fetches and can be switched off.
    #[derive(Default)]
    pub(crate) struct StubStore {
        pub casinos: Mutex<Vec<CasinoRecord>>,
        pub games: Mutex<Vec<GameRecord>>,
        pub casino_fetches: AtomicUsize,
        pub offline: AtomicBool,
    }

    impl StubStore {
        pub(crate) fn with_casinos(casinos: Vec<CasinoRecord>) -> Self {
            Self {
                casinos: Mutex::new(casinos),
                ..Default::default()
            }
        }

        fn check_online(&self) -> Result<()> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(AppError::store(503, "service unavailable"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecordStore for StubStore {
        async fn fetch_all_casinos(&self) -> Result<Vec<CasinoRecord>> {
            self.check_online()?;
            self.casino_fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.casinos.lock().unwrap().clone())
        }

        async fn fetch_casino_by_id(&self, id: &str) -> Result<Option<CasinoRecord>> {
            self.check_online()?;
            Ok(self.casinos.lock().unwrap().iter().find(|c| c.id == id).cloned())
        }

        async fn fetch_casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>> {
            self.check_online()?;
            Ok(self
                .casinos
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.slug == slug)
                .cloned())
        }

        async fn fetch_all_games(&self) -> Result<Vec<GameRecord>> {
            self.check_online()?;
            Ok(self.games.lock().unwrap().clone())
        }

        async fn fetch_game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>> {
            self.check_online()?;
            Ok(self.games.lock().unwrap().iter().find(|g| g.slug == slug).cloned())
        }

        async fn upsert_casino(&self, casino: &CasinoRecord) -> Result<CasinoRecord> {
            self.check_online()?;
            let mut casinos = self.casinos.lock().unwrap();
            casinos.retain(|c| c.id != casino.id);
            casinos.push(casino.clone());
            Ok(casino.clone())
        }

        async fn delete_casino(&self, id: &str) -> Result<()> {
            self.check_online()?;
            self.casinos.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }

        async fn upsert_game(&self, game: &GameRecord) -> Result<GameRecord> {
            self.check_online()?;
            let mut games = self.games.lock().unwrap();
            games.retain(|g| g.id != game.id);
            games.push(game.clone());
            Ok(game.clone())
        }

        async fn delete_game(&self, id: &str) -> Result<()> {
            self.check_online()?;
            self.games.lock().unwrap().retain(|g| g.id != id);
            Ok(())
        }
    }

    fn cached(casinos: Vec<CasinoRecord>) -> (CachedStore<StubStore, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = CachedStore::with_clock(
            StubStore::with_casinos(casinos),
            Arc::clone(&clock),
            TimeDelta::seconds(DEFAULT_TTL_SECS),
        );
        (store, clock)
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let (store, clock) = cached(vec![CasinoRecord::new("c1", "Uno", "uno")]);

        store.fetch_all_casinos().await.unwrap();
        clock.advance(TimeDelta::seconds(299));
        store.fetch_all_casinos().await.unwrap();

        assert_eq!(store.inner().casino_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refetch_after_ttl() {
        let (store, clock) = cached(vec![CasinoRecord::new("c1", "Uno", "uno")]);

        store.fetch_all_casinos().await.unwrap();
        clock.advance(TimeDelta::seconds(300));
        store.fetch_all_casinos().await.unwrap();

        assert_eq!(store.inner().casino_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_write_invalidates() {
        let (store, _clock) = cached(vec![CasinoRecord::new("c1", "Uno", "uno")]);

        store.fetch_all_casinos().await.unwrap();
        store
            .upsert_casino(&CasinoRecord::new("c2", "Dos", "dos"))
            .await
            .unwrap();
        assert!(store.last_snapshot().is_none());

        let all = store.fetch_all_casinos().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(store.inner().casino_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_snapshot() {
        let (store, _clock) = cached(vec![CasinoRecord::new("c1", "Uno", "uno")]);

        store.fetch_all_casinos().await.unwrap();
        store.inner().offline.store(true, Ordering::SeqCst);
        assert!(store.delete_casino("c1").await.is_err());
        assert!(store.last_snapshot().is_some());
    }

    #[tokio::test]
    async fn test_last_snapshot_survives_expiry_and_outage() {
        let (store, clock) = cached(vec![CasinoRecord::new("c1", "Uno", "uno")]);
        assert!(store.last_snapshot().is_none());

        store.fetch_all_casinos().await.unwrap();
        clock.advance(TimeDelta::minutes(10));
        store.inner().offline.store(true, Ordering::SeqCst);

        assert!(store.fetch_all_casinos().await.is_err());
        let stale = store.last_snapshot().unwrap();
        assert_eq!(stale.records.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_served_from_fresh_snapshot() {
        let (store, _clock) = cached(vec![CasinoRecord::new("c1", "Uno", "uno")]);
        store.fetch_all_casinos().await.unwrap();
        store.inner().offline.store(true, Ordering::SeqCst);

        let hit = store.fetch_casino_by_slug("uno").await.unwrap();
        assert_eq!(hit.map(|c| c.id), Some("c1".to_string()));
    }

    /// Store whose first casino list fetch reads its data, then waits.
    struct GatedStore {
        inner: StubStore,
        gated: AtomicBool,
        started: tokio::sync::Notify,
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl RecordStore for GatedStore {
        async fn fetch_all_casinos(&self) -> Result<Vec<CasinoRecord>> {
            let read = self.inner.fetch_all_casinos().await?;
            if self.gated.swap(false, Ordering::SeqCst) {
                self.started.notify_one();
                self.release.notified().await;
            }
            Ok(read)
        }

        async fn fetch_casino_by_id(&self, id: &str) -> Result<Option<CasinoRecord>> {
            self.inner.fetch_casino_by_id(id).await
        }

        async fn fetch_casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>> {
            self.inner.fetch_casino_by_slug(slug).await
        }

        async fn fetch_all_games(&self) -> Result<Vec<GameRecord>> {
            self.inner.fetch_all_games().await
        }

        async fn fetch_game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>> {
            self.inner.fetch_game_by_slug(slug).await
        }

        async fn upsert_casino(&self, casino: &CasinoRecord) -> Result<CasinoRecord> {
            self.inner.upsert_casino(casino).await
        }

        async fn delete_casino(&self, id: &str) -> Result<()> {
            self.inner.delete_casino(id).await
        }

        async fn upsert_game(&self, game: &GameRecord) -> Result<GameRecord> {
            self.inner.upsert_game(game).await
        }

        async fn delete_game(&self, id: &str) -> Result<()> {
            self.inner.delete_game(id).await
        }
    }

    #[tokio::test]
    async fn test_write_during_fetch_is_not_masked() {
        let store = CachedStore::new(GatedStore {
            inner: StubStore::with_casinos(vec![CasinoRecord::new("c1", "Uno", "uno")]),
            gated: AtomicBool::new(true),
            started: tokio::sync::Notify::new(),
            release: tokio::sync::Notify::new(),
        });

        let write = async {
            store.inner().started.notified().await;
            store
                .upsert_casino(&CasinoRecord::new("c2", "Dos", "dos"))
                .await
                .unwrap();
            store.inner().release.notify_one();
        };
        let (in_flight, ()) = tokio::join!(store.fetch_all_casinos(), write);

        // the slow caller still gets what it read
        assert_eq!(in_flight.unwrap().len(), 1);
        assert!(store.last_snapshot().is_none());
        assert_eq!(store.fetch_all_casinos().await.unwrap().len(), 2);
    }
}
