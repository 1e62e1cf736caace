// src/engine/games.rs

//! Filtering and ordering for the games catalog.

use serde::{Deserialize, Serialize};

use crate::models::{GameCategory, GameRecord};

/// Sort key for the games list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameSortKey {
    /// Highest return to player first
    #[default]
    Rtp,
    /// Alphabetical
    Name,
    #[serde(other)]
    Original,
}

impl GameSortKey {
    pub fn parse(key: &str) -> Self {
        match key.trim() {
            "rtp" => GameSortKey::Rtp,
            "name" => GameSortKey::Name,
            _ => GameSortKey::Original,
        }
    }
}

/// What the games page asks for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameQuery {
    pub search: String,
    pub category: Option<GameCategory>,
    pub sort: GameSortKey,
}

impl GameQuery {
    pub fn matches(&self, game: &GameRecord) -> bool {
        if !game.is_active() {
            return false;
        }
        if self.category.is_some_and(|c| c != game.category) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let q = self.search.to_lowercase();
        game.name.to_lowercase().contains(&q) || game.provider.to_lowercase().contains(&q)
    }

    /// Filter then stable-sort a games snapshot.
    pub fn apply(&self, games: &[GameRecord]) -> Vec<GameRecord> {
        let mut result: Vec<GameRecord> =
            games.iter().filter(|g| self.matches(g)).cloned().collect();
        match self.sort {
            GameSortKey::Rtp => result.sort_by(|a, b| b.rtp.total_cmp(&a.rtp)),
            GameSortKey::Name => {
                result.sort_by_key(|g| g.name.to_lowercase());
            }
            GameSortKey::Original => {}
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;

    fn game(id: &str, name: &str, provider: &str, category: GameCategory, rtp: f64) -> GameRecord {
        let mut g = GameRecord::new(id, name, id);
        g.provider = provider.into();
        g.category = category;
        g.rtp = rtp;
        g
    }

    fn fixtures() -> Vec<GameRecord> {
        let mut retired = game("g4", "Old Slot", "Novomatic", GameCategory::Slots, 99.0);
        retired.status = RecordStatus::Inactive;
        vec![
            game("g1", "Gates of Olympus", "Pragmatic Play", GameCategory::Slots, 96.5),
            game("g2", "Lightning Roulette", "Evolution", GameCategory::Live, 97.3),
            game("g3", "Sweet Bonanza", "Pragmatic Play", GameCategory::Slots, 96.48),
            retired,
        ]
    }

    #[test]
    fn test_category_and_rtp_sort() {
        let query = GameQuery {
            category: Some(GameCategory::Slots),
            ..Default::default()
        };
        let ids: Vec<_> = query.apply(&fixtures()).into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["g1", "g3"]);
    }

    #[test]
    fn test_search_by_provider() {
        let query = GameQuery {
            search: "pragmatic".into(),
            sort: GameSortKey::Name,
            ..Default::default()
        };
        let names: Vec<_> = query.apply(&fixtures()).into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Gates of Olympus", "Sweet Bonanza"]);
    }

    #[test]
    fn test_inactive_hidden() {
        let query = GameQuery {
            search: "old".into(),
            ..Default::default()
        };
        assert!(query.apply(&fixtures()).is_empty());
    }
}
