// src/engine/sort.rs

//! Display ordering for filtered casino lists.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::CasinoRecord;

/// Sort key for the casino list. Every key sorts highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Rating,
    Bonus,
    Newest,
    Games,
    /// Keep the store's order
    #[serde(other)]
    Original,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Bonus => "bonus",
            SortKey::Newest => "newest",
            SortKey::Games => "games",
            SortKey::Original => "original",
        }
    }

    /// Unrecognized keys leave the order untouched.
    pub fn parse(key: &str) -> Self {
        match key.trim() {
            "rating" => SortKey::Rating,
            "bonus" => SortKey::Bonus,
            "newest" => SortKey::Newest,
            "games" => SortKey::Games,
            _ => SortKey::Original,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two casinos for display, descending on the chosen key.
pub fn compare(a: &CasinoRecord, b: &CasinoRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Rating => b.rating.total_cmp(&a.rating),
        SortKey::Bonus => b.bonus.amount.total_cmp(&a.bonus.amount),
        SortKey::Newest => b.established.cmp(&a.established),
        SortKey::Games => b.games.total.cmp(&a.games.total),
        SortKey::Original => Ordering::Equal,
    }
}

/// Stable in-place sort; ties keep their relative order.
pub fn sort_casinos(casinos: &mut [CasinoRecord], key: SortKey) {
    casinos.sort_by(|a, b| compare(a, b, key));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn casino(id: &str, rating: f64, amount: f64, established: i32, total: u32) -> CasinoRecord {
        let mut c = CasinoRecord::new(id, id, id);
        c.rating = rating;
        c.bonus.amount = amount;
        c.established = established;
        c.games.total = total;
        c
    }

    fn ids(casinos: &[CasinoRecord]) -> Vec<&str> {
        casinos.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_already_descending_order_is_kept() {
        let original = vec![
            casino("a", 4.9, 50000.0, 2000, 5000),
            casino("b", 4.5, 25000.0, 1916, 2000),
        ];

        for key in [SortKey::Rating, SortKey::Newest, SortKey::Bonus, SortKey::Games] {
            let mut list = original.clone();
            sort_casinos(&mut list, key);
            assert_eq!(ids(&list), vec!["a", "b"], "key {key}");
        }
    }

    #[test]
    fn test_sorts_descending() {
        let mut list = vec![
            casino("old", 3.0, 100.0, 1990, 10),
            casino("new", 4.0, 50.0, 2021, 500),
        ];
        sort_casinos(&mut list, SortKey::Newest);
        assert_eq!(ids(&list), vec!["new", "old"]);

        sort_casinos(&mut list, SortKey::Bonus);
        assert_eq!(ids(&list), vec!["old", "new"]);
    }

    #[test]
    fn test_rating_ties_are_stable() {
        let mut list = vec![
            casino("first", 4.5, 0.0, 0, 0),
            casino("top", 5.0, 0.0, 0, 0),
            casino("second", 4.5, 0.0, 0, 0),
        ];
        sort_casinos(&mut list, SortKey::Rating);
        assert_eq!(ids(&list), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_unknown_key_keeps_order() {
        let mut list = vec![casino("low", 1.0, 0.0, 0, 0), casino("high", 5.0, 0.0, 0, 0)];
        sort_casinos(&mut list, SortKey::parse("popularity"));
        assert_eq!(ids(&list), vec!["low", "high"]);
    }
}
