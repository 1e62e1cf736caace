// src/admin/session.rs

//! Draft submission against a record store.

use std::fmt;

use crate::admin::{CasinoDraft, GameDraft};
use crate::error::AppError;
use crate::models::{CasinoRecord, GameRecord, MessageLocale, render};
use crate::records::RecordStore;

/// Blocking, user-facing failure message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// One admin editing session: a casino draft, a game draft and the store
/// they are submitted to.
///
/// A failed submission leaves the draft untouched so it can be retried.
pub struct AdminSession<S> {
    store: S,
    messages: MessageLocale,
    pub casino: CasinoDraft,
    pub game: GameDraft,
}

impl<S: RecordStore> AdminSession<S> {
    pub fn new(store: S, messages: MessageLocale) -> Self {
        Self {
            store,
            messages,
            casino: CasinoDraft::default(),
            game: GameDraft::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn messages(&self) -> &MessageLocale {
        &self.messages
    }

    fn alert(&self, name: &str, error: &AppError) -> Alert {
        if let AppError::Validation(_) = error {
            return Alert {
                message: self.messages.name_required.clone(),
            };
        }
        log::error!("Failed to save {}: {}", name, error);
        Alert {
            message: render(
                &self.messages.record_save_failed,
                &[("name", name), ("error", error.to_string().as_str())],
            ),
        }
    }

    /// Validate and upsert the casino draft.
    pub async fn submit_casino(&mut self) -> Result<CasinoRecord, Alert> {
        let saved = match self.casino.to_record() {
            Ok(record) => self.store.upsert_casino(&record).await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(record) => {
                log::info!("Saved casino {} ({})", record.name, record.id);
                self.casino = CasinoDraft::default();
                Ok(record)
            }
            Err(e) => Err(self.alert(self.casino.name.trim(), &e)),
        }
    }

    /// Validate and upsert the game draft.
    pub async fn submit_game(&mut self) -> Result<GameRecord, Alert> {
        let saved = match self.game.to_record() {
            Ok(record) => self.store.upsert_game(&record).await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(record) => {
                log::info!("Saved game {} ({})", record.name, record.id);
                self.game = GameDraft::default();
                Ok(record)
            }
            Err(e) => Err(self.alert(self.game.name.trim(), &e)),
        }
    }

    pub async fn delete_casino(&self, id: &str) -> Result<(), Alert> {
        self.store
            .delete_casino(id)
            .await
            .map_err(|e| self.alert(id, &e))?;
        log::info!("Deleted casino {}", id);
        Ok(())
    }

    pub async fn delete_game(&self, id: &str) -> Result<(), Alert> {
        self.store
            .delete_game(id)
            .await
            .map_err(|e| self.alert(id, &e))?;
        log::info!("Deleted game {}", id);
        Ok(())
    }

    /// Load an existing casino into the draft for editing.
    pub async fn edit_casino(&mut self, id: &str) -> Result<(), Alert> {
        match self.store.fetch_casino_by_id(id).await {
            Ok(Some(record)) => {
                self.casino = CasinoDraft::from(record);
                Ok(())
            }
            Ok(None) => Err(self.alert(id, &AppError::not_found(id))),
            Err(e) => Err(self.alert(id, &e)),
        }
    }
}
