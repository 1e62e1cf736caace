// src/models/mod.rs

//! Domain models for the catalog.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

use serde::{Deserialize, Deserializer};

mod casino;
mod config;
mod game;
mod locale;

// Re-export all public types
pub use casino::{Bonus, CasinoRecord, GameCounts, RecordStatus};
pub use config::{
    API_KEY_ENV, BASE_URL_ENV, CacheConfig, Config, LocaleSettings, StorageConfig, StoreConfig,
};
pub use game::{GameCategory, GameRecord};
pub use locale::{Language, LocaleConfig, MessageLocale, render};

/// Read a store column that may be `null` as the field's default.
///
/// `#[serde(default)]` alone only covers missing keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
