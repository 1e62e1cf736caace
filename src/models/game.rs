// src/models/game.rs

//! Game record as served by the record store.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordStatus;

/// Game category used by the games catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameCategory {
    Slots,
    Live,
    Table,
    Poker,
    #[default]
    #[serde(other)]
    Other,
}

impl GameCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            GameCategory::Slots => "slots",
            GameCategory::Live => "live",
            GameCategory::Table => "table",
            GameCategory::Poker => "poker",
            GameCategory::Other => "other",
        }
    }

    /// Parse a category tag; unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "slots" => Some(GameCategory::Slots),
            "live" => Some(GameCategory::Live),
            "table" => Some(GameCategory::Table),
            "poker" => Some(GameCategory::Poker),
            "other" => Some(GameCategory::Other),
            _ => None,
        }
    }
}

impl fmt::Display for GameCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game listed in the games catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub name: String,
    pub slug: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub provider: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub category: GameCategory,

    /// Return to player, in percent
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rtp: f64,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub volatility: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub min_bet: f64,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub max_bet: f64,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub features: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: RecordStatus,
}

impl GameRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            provider: String::new(),
            category: GameCategory::Other,
            rtp: 0.0,
            volatility: String::new(),
            min_bet: 0.0,
            max_bet: 0.0,
            features: Vec::new(),
            description: String::new(),
            status: RecordStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_is_other() {
        let json = r#"{"id": "g1", "name": "Aviator", "slug": "aviator", "category": "crash"}"#;
        let game: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(game.category, GameCategory::Other);
    }

    #[test]
    fn test_null_columns_read_as_defaults() {
        let json = r#"{"id": "g1", "name": "Aviator", "slug": "aviator", "provider": null,
            "category": null, "rtp": null, "features": null, "description": null}"#;
        let game: GameRecord = serde_json::from_str(json).unwrap();
        assert!(game.provider.is_empty());
        assert_eq!(game.category, GameCategory::Other);
        assert_eq!(game.rtp, 0.0);
        assert!(game.features.is_empty());
        assert!(game.is_active());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(GameCategory::parse(" Slots "), Some(GameCategory::Slots));
        assert_eq!(GameCategory::parse("bingo"), None);
    }
}
