// src/records/file.rs

//! JSON-file record store for offline development and tests.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! └── catalog.json     # { "casinos": [...], "games": [...] }
//! ```
//!
//! Reads apply the same active filter and ordering as the remote store.
//! Writes rewrite the whole file atomically (temp file, then rename).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{CasinoRecord, GameRecord};
use crate::records::{RecordStore, active_by_name, active_by_rating};

pub const CATALOG_FILE: &str = "catalog.json";

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub casinos: Vec<CasinoRecord>,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

/// File-backed record store.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store rooted at `root_dir`, using `root_dir/catalog.json`.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: root_dir.into().join(CATALOG_FILE),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the catalog; a missing file is an empty catalog.
    pub async fn load(&self) -> Result<CatalogFile> {
        let catalog: CatalogFile = match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No catalog found at {}", self.path.display());
                return Ok(CatalogFile::default());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        for casino in catalog.casinos.iter().filter(|c| !c.games.is_consistent()) {
            log::warn!(
                "Casino {} has per-type game counts above its total ({})",
                casino.id,
                casino.games.total
            );
        }
        Ok(catalog)
    }

    /// Write the catalog atomically.
    pub async fn save(&self, catalog: &CatalogFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(catalog)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn modify<F, T>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut CatalogFile) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut catalog = self.load().await?;
        let out = change(&mut catalog)?;
        self.save(&catalog).await?;
        Ok(out)
    }
}

fn replace_by_id<T: Clone>(records: &mut Vec<T>, record: &T, id_of: impl Fn(&T) -> &str) {
    match records.iter().position(|r| id_of(r) == id_of(record)) {
        Some(pos) => records[pos] = record.clone(),
        None => records.push(record.clone()),
    }
}

fn remove_by_id<T>(records: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> Result<()> {
    let before = records.len();
    records.retain(|r| id_of(r) != id);
    if records.len() == before {
        return Err(AppError::not_found(id));
    }
    Ok(())
}

#[async_trait]
impl RecordStore for FileStore {
    async fn fetch_all_casinos(&self) -> Result<Vec<CasinoRecord>> {
        Ok(active_by_rating(self.load().await?.casinos))
    }

    async fn fetch_casino_by_id(&self, id: &str) -> Result<Option<CasinoRecord>> {
        Ok(self.load().await?.casinos.into_iter().find(|c| c.id == id))
    }

    async fn fetch_casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>> {
        Ok(self.load().await?.casinos.into_iter().find(|c| c.slug == slug))
    }

    async fn fetch_all_games(&self) -> Result<Vec<GameRecord>> {
        Ok(active_by_name(self.load().await?.games))
    }

    async fn fetch_game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>> {
        Ok(self.load().await?.games.into_iter().find(|g| g.slug == slug))
    }

    async fn upsert_casino(&self, casino: &CasinoRecord) -> Result<CasinoRecord> {
        let stored = casino.clone();
        self.modify(move |catalog| {
            replace_by_id(&mut catalog.casinos, &stored, |c| c.id.as_str());
            Ok(stored)
        })
        .await
    }

    async fn delete_casino(&self, id: &str) -> Result<()> {
        self.modify(|catalog| remove_by_id(&mut catalog.casinos, id, |c| c.id.as_str()))
            .await
    }

    async fn upsert_game(&self, game: &GameRecord) -> Result<GameRecord> {
        let stored = game.clone();
        self.modify(move |catalog| {
            replace_by_id(&mut catalog.games, &stored, |g| g.id.as_str());
            Ok(stored)
        })
        .await
    }

    async fn delete_game(&self, id: &str) -> Result<()> {
        self.modify(|catalog| remove_by_id(&mut catalog.games, id, |g| g.id.as_str()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;
    use tempfile::TempDir;

    fn casino(id: &str, rating: f64, status: RecordStatus) -> CasinoRecord {
        let mut c = CasinoRecord::new(id, id.to_uppercase(), id);
        c.rating = rating;
        c.status = status;
        c
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        assert!(store.fetch_all_casinos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_active_only_by_rating() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store
            .save(&CatalogFile {
                casinos: vec![
                    casino("low", 3.5, RecordStatus::Active),
                    casino("draft", 5.0, RecordStatus::Pending),
                    casino("high", 4.9, RecordStatus::Active),
                ],
                games: vec![],
            })
            .await
            .unwrap();

        let ids: Vec<_> = store
            .fetch_all_casinos()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["high", "low"]);

        // singular lookups ignore status
        assert!(store.fetch_casino_by_id("draft").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_delete() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store
            .upsert_casino(&casino("a", 4.0, RecordStatus::Active))
            .await
            .unwrap();
        store
            .upsert_casino(&casino("a", 4.4, RecordStatus::Active))
            .await
            .unwrap();

        let all = store.load().await.unwrap().casinos;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].rating, 4.4);

        store.delete_casino("a").await.unwrap();
        assert!(matches!(
            store.delete_casino("a").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_games_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        store
            .upsert_game(&GameRecord::new("g2", "Sweet Bonanza", "sweet-bonanza"))
            .await
            .unwrap();
        store
            .upsert_game(&GameRecord::new("g1", "Aviator", "aviator"))
            .await
            .unwrap();

        let names: Vec<_> = store
            .fetch_all_games()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Aviator", "Sweet Bonanza"]);
        assert!(store.fetch_game_by_slug("aviator").await.unwrap().is_some());
    }
}
