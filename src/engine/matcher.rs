// src/engine/matcher.rs

//! Search and filter predicate for casino records.

use crate::models::CasinoRecord;

use super::criteria::{FilterCriteria, GameType, LicenseType};

/// Search terms that match any casino offering games at all.
///
/// The keyword is not mapped to a specific game type: "ruleta" passes any
/// casino with `games.total > 0`.
pub const GAME_KEYWORDS: [&str; 8] = [
    "slots",
    "tragamonedas",
    "live",
    "vivo",
    "blackjack",
    "ruleta",
    "roulette",
    "poker",
];

/// Whether a casino passes the search query and every active filter.
pub fn matches(casino: &CasinoRecord, query: &str, criteria: &FilterCriteria) -> bool {
    matches_query(casino, query)
        && matches_payment(casino, criteria)
        && matches_deposit(casino, criteria)
        && matches_game_types(casino, criteria)
        && matches_withdrawal(casino, criteria)
        && matches_license(casino, criteria)
}

/// Keep the casinos that pass [`matches`], in input order.
pub fn filter_casinos(
    casinos: &[CasinoRecord],
    query: &str,
    criteria: &FilterCriteria,
) -> Vec<CasinoRecord> {
    casinos
        .iter()
        .filter(|c| matches(c, query, criteria))
        .cloned()
        .collect()
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_query(casino: &CasinoRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();

    contains_ci(&casino.name, &q)
        || casino.payment_methods.iter().any(|m| contains_ci(m, &q))
        || casino.features.iter().any(|f| contains_ci(f, &q))
        || (GAME_KEYWORDS.contains(&q.as_str()) && casino.games.total > 0)
}

fn matches_payment(casino: &CasinoRecord, criteria: &FilterCriteria) -> bool {
    criteria.payment_methods.is_empty()
        || criteria
            .payment_methods
            .iter()
            .any(|m| casino.payment_methods.contains(m))
}

fn matches_deposit(casino: &CasinoRecord, criteria: &FilterCriteria) -> bool {
    criteria
        .min_deposit
        .is_none_or(|bucket| bucket.contains(casino.bonus.min_deposit))
}

fn matches_game_type(casino: &CasinoRecord, game_type: GameType) -> bool {
    match game_type {
        GameType::Slots => casino.games.slots > 0,
        GameType::Live => casino.games.live > 0,
        GameType::Table => casino.games.table > 0,
        GameType::Sports => casino.features.iter().any(|f| contains_ci(f, "deport")),
        GameType::Poker => casino.features.iter().any(|f| contains_ci(f, "poker")),
    }
}

fn matches_game_types(casino: &CasinoRecord, criteria: &FilterCriteria) -> bool {
    criteria
        .game_types
        .iter()
        .all(|t| matches_game_type(casino, *t))
}

fn matches_withdrawal(casino: &CasinoRecord, criteria: &FilterCriteria) -> bool {
    let Some(bucket) = criteria.withdrawal_time else {
        return true;
    };
    let time = casino.withdrawal_time.to_lowercase();
    bucket.markers().iter().any(|m| time.contains(m))
}

fn matches_license(casino: &CasinoRecord, criteria: &FilterCriteria) -> bool {
    match criteria.license_type {
        LicenseType::All => true,
        LicenseType::Segob => casino.licenses.iter().any(|l| {
            let l = l.to_lowercase();
            l.contains("segob") || l.contains("dgjs")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::criteria::{DepositBucket, WithdrawalBucket};
    use crate::models::GameCounts;

    fn casino(id: &str, name: &str) -> CasinoRecord {
        CasinoRecord::new(id, name, id)
    }

    fn fixtures() -> Vec<CasinoRecord> {
        let mut caliente = casino("c1", "Caliente");
        caliente.payment_methods = vec!["OXXO".into(), "SPEI".into(), "Visa".into()];
        caliente.features = vec!["Apuestas Deportivas".into(), "Casino en vivo".into()];
        caliente.games = GameCounts {
            total: 2000,
            slots: 1500,
            live: 120,
            table: 80,
        };
        caliente.bonus.min_deposit = 100.0;
        caliente.withdrawal_time = "24-48 horas".into();
        caliente.licenses = vec!["SEGOB DGJS/DGAJS/SCEVF/P-06/2017".into()];

        let mut codere = casino("c2", "Codere");
        codere.payment_methods = vec!["PayPal".into(), "Visa".into()];
        codere.features = vec!["Video Poker".into()];
        codere.games = GameCounts {
            total: 900,
            slots: 800,
            live: 0,
            table: 40,
        };
        codere.bonus.min_deposit = 500.0;
        codere.withdrawal_time = "Instantáneo".into();
        codere.licenses = vec!["Malta Gaming Authority".into()];

        let mut empty = casino("c3", "Nuevo Casino");
        empty.bonus.min_deposit = 250.0;
        empty.withdrawal_time = "3-5 días".into();

        vec![caliente, codere, empty]
    }

    fn ids(casinos: &[CasinoRecord]) -> Vec<&str> {
        casinos.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_and_criteria_pass_everything() {
        let casinos = fixtures();
        let result = filter_casinos(&casinos, "", &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_search_matches_payment_case_insensitive() {
        let casinos = fixtures();
        let result = filter_casinos(&casinos, "oxxo", &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["c1"]);
    }

    #[test]
    fn test_search_matches_name_and_feature() {
        let casinos = fixtures();
        assert_eq!(
            ids(&filter_casinos(&casinos, "CODERE", &FilterCriteria::default())),
            vec!["c2"]
        );
        assert_eq!(
            ids(&filter_casinos(&casinos, "deportivas", &FilterCriteria::default())),
            vec!["c1"]
        );
    }

    #[test]
    fn test_game_keyword_requires_any_games() {
        let casinos = fixtures();
        // "ruleta" is not checked against table counts, only games.total
        let result = filter_casinos(&casinos, "Ruleta", &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["c1", "c2"]);
    }

    #[test]
    fn test_payment_filter_is_any_and_case_sensitive() {
        let casinos = fixtures();
        let mut criteria = FilterCriteria::default();
        criteria.add_payment_method("SPEI");
        criteria.add_payment_method("PayPal");
        assert_eq!(ids(&filter_casinos(&casinos, "", &criteria)), vec!["c1", "c2"]);

        let mut lower = FilterCriteria::default();
        lower.add_payment_method("oxxo");
        assert!(filter_casinos(&casinos, "", &lower).is_empty());
    }

    #[test]
    fn test_deposit_bucket_boundaries() {
        let casinos = fixtures();
        let low = FilterCriteria {
            min_deposit: Some(DepositBucket::UpTo100),
            ..Default::default()
        };
        let mid = FilterCriteria {
            min_deposit: Some(DepositBucket::From100To200),
            ..Default::default()
        };
        assert_eq!(ids(&filter_casinos(&casinos, "", &low)), vec!["c1"]);
        assert_eq!(ids(&filter_casinos(&casinos, "", &mid)), vec!["c1"]);
    }

    #[test]
    fn test_deposit_500_plus() {
        let mut below = casino("a", "A");
        below.bonus.min_deposit = 200.0;
        let mut at = casino("b", "B");
        at.bonus.min_deposit = 500.0;

        let criteria = FilterCriteria {
            min_deposit: Some(DepositBucket::From500),
            ..Default::default()
        };
        assert!(!matches(&below, "", &criteria));
        assert!(matches(&at, "", &criteria));
    }

    #[test]
    fn test_game_types_are_all_required() {
        let casinos = fixtures();
        let criteria = FilterCriteria {
            game_types: vec![GameType::Slots, GameType::Live],
            ..Default::default()
        };
        assert_eq!(ids(&filter_casinos(&casinos, "", &criteria)), vec!["c1"]);

        let sports = FilterCriteria {
            game_types: vec![GameType::Sports],
            ..Default::default()
        };
        assert_eq!(ids(&filter_casinos(&casinos, "", &sports)), vec!["c1"]);

        let poker = FilterCriteria {
            game_types: vec![GameType::Poker],
            ..Default::default()
        };
        assert_eq!(ids(&filter_casinos(&casinos, "", &poker)), vec!["c2"]);
    }

    #[test]
    fn test_withdrawal_substrings() {
        let casinos = fixtures();
        let within = |bucket| FilterCriteria {
            withdrawal_time: Some(bucket),
            ..Default::default()
        };

        // "24-48 horas" lands in both the 24h and 48h buckets
        assert_eq!(
            ids(&filter_casinos(&casinos, "", &within(WithdrawalBucket::Within24h))),
            vec!["c1"]
        );
        assert_eq!(
            ids(&filter_casinos(&casinos, "", &within(WithdrawalBucket::Within48h))),
            vec!["c1"]
        );
        assert_eq!(
            ids(&filter_casinos(&casinos, "", &within(WithdrawalBucket::Instant))),
            vec!["c2"]
        );
        assert!(filter_casinos(&casinos, "", &within(WithdrawalBucket::Within72h)).is_empty());
    }

    #[test]
    fn test_segob_license() {
        let casinos = fixtures();
        let criteria = FilterCriteria {
            license_type: LicenseType::Segob,
            ..Default::default()
        };
        assert_eq!(ids(&filter_casinos(&casinos, "", &criteria)), vec!["c1"]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let casinos = fixtures();
        let criteria = FilterCriteria {
            payment_methods: vec!["Visa".into()],
            ..Default::default()
        };
        let first = filter_casinos(&casinos, "a", &criteria);
        let second = filter_casinos(&casinos, "a", &criteria);
        assert_eq!(first, second);
    }

    #[test]
    fn test_narrowing_is_monotonic() {
        let casinos = fixtures();
        let loose = FilterCriteria {
            game_types: vec![GameType::Slots],
            ..Default::default()
        };
        let strict = FilterCriteria {
            game_types: vec![GameType::Slots, GameType::Table],
            min_deposit: Some(DepositBucket::UpTo100),
            license_type: LicenseType::Segob,
            ..Default::default()
        };

        let wide = filter_casinos(&casinos, "", &loose);
        let narrow = filter_casinos(&casinos, "", &strict);
        assert!(narrow.iter().all(|c| wide.contains(c)));
        assert!(narrow.len() <= wide.len());
    }
}
