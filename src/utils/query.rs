// src/utils/query.rs

//! URL query string codecs for shareable filter and comparison state.
//!
//! Filter keys: `search`, `payment`, `deposit`, `games`, `withdrawal`,
//! `license`, `sort`. Comparison key: `casinos`. Lists are comma-joined.
//! Values that do not parse are treated as "no filter".

use url::form_urlencoded;

use crate::engine::{
    CatalogQuery, ComparisonSelection, DepositBucket, FilterCriteria, GameType, LicenseType,
    SortKey, WithdrawalBucket,
};

pub const SEARCH: &str = "search";
pub const PAYMENT: &str = "payment";
pub const DEPOSIT: &str = "deposit";
pub const GAMES: &str = "games";
pub const WITHDRAWAL: &str = "withdrawal";
pub const LICENSE: &str = "license";
pub const SORT: &str = "sort";
pub const CASINOS: &str = "casinos";

fn pairs(query: &str) -> form_urlencoded::Parse<'_> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Decode a listing query string. Unknown keys are ignored.
pub fn decode_catalog_query(query: &str) -> CatalogQuery {
    let mut decoded = CatalogQuery::default();
    let criteria = &mut decoded.criteria;

    for (key, value) in pairs(query) {
        match &*key {
            SEARCH => decoded.search = value.trim().to_string(),
            PAYMENT => {
                for method in split_list(&value) {
                    criteria.add_payment_method(method);
                }
            }
            DEPOSIT => criteria.min_deposit = DepositBucket::parse(&value),
            GAMES => {
                for game_type in split_list(&value).filter_map(GameType::parse) {
                    criteria.add_game_type(game_type);
                }
            }
            WITHDRAWAL => criteria.withdrawal_time = WithdrawalBucket::parse(&value),
            LICENSE => criteria.license_type = LicenseType::parse(&value),
            SORT => decoded.sort = SortKey::parse(&value),
            _ => {}
        }
    }

    decoded
}

/// Encode a listing query, omitting empty and default values.
pub fn encode_catalog_query(query: &CatalogQuery) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    let criteria: &FilterCriteria = &query.criteria;

    if !query.search.is_empty() {
        out.append_pair(SEARCH, &query.search);
    }
    if !criteria.payment_methods.is_empty() {
        out.append_pair(PAYMENT, &criteria.payment_methods.join(","));
    }
    if let Some(bucket) = criteria.min_deposit {
        out.append_pair(DEPOSIT, bucket.as_str());
    }
    if !criteria.game_types.is_empty() {
        let tags: Vec<&str> = criteria.game_types.iter().map(|t| t.as_str()).collect();
        out.append_pair(GAMES, &tags.join(","));
    }
    if let Some(bucket) = criteria.withdrawal_time {
        out.append_pair(WITHDRAWAL, bucket.as_str());
    }
    if criteria.license_type != LicenseType::All {
        out.append_pair(LICENSE, criteria.license_type.as_str());
    }
    if query.sort != SortKey::default() {
        out.append_pair(SORT, query.sort.as_str());
    }

    out.finish()
}

/// Decode the comparison selection from the `casinos` key.
pub fn decode_selection(query: &str) -> ComparisonSelection {
    pairs(query)
        .filter(|(key, _)| key == CASINOS)
        .map(|(_, value)| {
            ComparisonSelection::from_ids(split_list(&value).map(str::to_string).collect::<Vec<_>>())
        })
        .last()
        .unwrap_or_default()
}

/// Encode the comparison selection; empty selections encode to "".
pub fn encode_selection(selection: &ComparisonSelection) -> String {
    if selection.is_empty() {
        return String::new();
    }
    form_urlencoded::Serializer::new(String::new())
        .append_pair(CASINOS, &selection.ids().join(","))
        .finish()
}
