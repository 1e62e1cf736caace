//! Record store abstractions for casino and game data.
//!
//! The store is a hosted relational database reached over its REST API.
//! Implementations:
//!
//! - [`RestStore`]: the remote database
//! - [`FileStore`]: a JSON catalog on disk, for offline work and tests
//! - [`CachedStore`]: TTL cache in front of any other store
//!
//! ```text
//! RestStore ──▶ CachedStore ──▶ CatalogService ──▶ engine
//! ```

pub mod cache;
pub mod clock;
pub mod file;
pub mod rest;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CasinoRecord, GameRecord};

// Re-export for convenience
pub use cache::CachedStore;
pub use clock::{Clock, ManualClock, SystemClock};
pub use file::{CatalogFile, FileStore};
pub use rest::RestStore;

/// Read and write surface of the record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Active casinos, ordered by rating descending.
    async fn fetch_all_casinos(&self) -> Result<Vec<CasinoRecord>>;

    /// Look up a casino by id, regardless of status.
    async fn fetch_casino_by_id(&self, id: &str) -> Result<Option<CasinoRecord>>;

    /// Look up a casino by slug, regardless of status.
    async fn fetch_casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>>;

    /// Active games, ordered by name.
    async fn fetch_all_games(&self) -> Result<Vec<GameRecord>>;

    async fn fetch_game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>>;

    /// Insert or update a casino by id; returns the stored record.
    async fn upsert_casino(&self, casino: &CasinoRecord) -> Result<CasinoRecord>;

    async fn delete_casino(&self, id: &str) -> Result<()>;

    /// Insert or update a game by id; returns the stored record.
    async fn upsert_game(&self, game: &GameRecord) -> Result<GameRecord>;

    async fn delete_game(&self, id: &str) -> Result<()>;
}

/// Keep active casinos and order them the way the store does.
pub(crate) fn active_by_rating(casinos: impl IntoIterator<Item = CasinoRecord>) -> Vec<CasinoRecord> {
    let mut active: Vec<CasinoRecord> = casinos.into_iter().filter(|c| c.is_active()).collect();
    active.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    active
}

/// Keep active games ordered by name.
pub(crate) fn active_by_name(games: impl IntoIterator<Item = GameRecord>) -> Vec<GameRecord> {
    let mut active: Vec<GameRecord> = games.into_iter().filter(|g| g.is_active()).collect();
    active.sort_by(|a, b| a.name.cmp(&b.name));
    active
}
