//! Catalog filter, sort and compare engine.
//!
//! Everything here is synchronous and pure: it works on snapshots already
//! fetched from the record store and never performs I/O.
//!
//! - `criteria`: filter dimensions and active-filter accounting
//! - `matcher`: search/filter predicate
//! - `sort`: display ordering
//! - `compare`: bounded selection and best-value highlighting

pub mod compare;
pub mod criteria;
pub mod games;
pub mod matcher;
pub mod payments;
pub mod sort;

use serde::{Deserialize, Serialize};

use crate::models::CasinoRecord;

pub use compare::{
    ComparisonCell, ComparisonColumn, ComparisonSelection, ComparisonTable, CompareField,
    MAX_COMPARE, best_value, is_best,
};
pub use criteria::{
    DepositBucket, FilterCriteria, FilterDimension, GameType, LicenseType, WithdrawalBucket,
};
pub use games::{GameQuery, GameSortKey};
pub use matcher::{filter_casinos, matches};
pub use payments::{PaymentMethodSummary, payment_method_index};
pub use sort::{SortKey, compare, sort_casinos};

/// Everything the listing page narrows and orders by.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub criteria: FilterCriteria,

    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Run the full pipeline: filter, then stable sort.
    ///
    /// The search is trimmed first, so a whitespace-only search matches
    /// everything. [`matches`] takes its query as given: there `" "` is a
    /// literal substring.
    pub fn apply(&self, casinos: &[CasinoRecord]) -> Vec<CasinoRecord> {
        let mut result = filter_casinos(casinos, self.search.trim(), &self.criteria);
        sort_casinos(&mut result, self.sort);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_filters_then_sorts() {
        let mut low = CasinoRecord::new("low", "Playcity", "playcity");
        low.rating = 4.1;
        low.payment_methods = vec!["OXXO".into()];
        let mut high = CasinoRecord::new("high", "Caliente", "caliente");
        high.rating = 4.8;
        high.payment_methods = vec!["OXXO".into()];
        let mut other = CasinoRecord::new("other", "Betway", "betway");
        other.rating = 5.0;
        other.payment_methods = vec!["Visa".into()];

        let query = CatalogQuery {
            search: " oxxo ".into(),
            ..Default::default()
        };
        let ids: Vec<_> = query
            .apply(&[low, other, high])
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["high", "low"]);
    }

    #[test]
    fn test_empty_snapshot_yields_empty_result() {
        assert!(CatalogQuery::default().apply(&[]).is_empty());
    }

    #[test]
    fn test_blank_search_is_no_search() {
        let casinos = vec![CasinoRecord::new("c1", "Codere", "codere")];
        let query = CatalogQuery {
            search: "   ".into(),
            ..Default::default()
        };

        assert_eq!(query.apply(&casinos).len(), 1);
        assert!(!matches(&casinos[0], "   ", &query.criteria));
    }
}
