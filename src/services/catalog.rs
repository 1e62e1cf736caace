// src/services/catalog.rs

//! Catalog service.
//!
//! Fetches snapshots from the record store and runs the engine over them.
//! Store failures are never fatal here: they are logged and the view is
//! built from an empty collection, flagged `store_unavailable`.

use futures::join;
use serde::Serialize;

use crate::engine::{
    CatalogQuery, ComparisonSelection, ComparisonTable, GameQuery, PaymentMethodSummary,
    payment_method_index,
};
use crate::error::Result;
use crate::models::{CasinoRecord, GameRecord};
use crate::records::RecordStore;

/// Result of running a listing query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogView {
    pub casinos: Vec<CasinoRecord>,
    /// Active casinos before filtering
    pub total: usize,
    pub active_filter_count: usize,
    pub store_unavailable: bool,
}

/// Comparison table plus the store status it was built under.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonView {
    pub table: ComparisonTable,
    pub store_unavailable: bool,
}

/// Landing page summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogOverview {
    pub top_rated: Vec<CasinoRecord>,
    pub casino_count: usize,
    pub game_count: usize,
    pub payment_methods: Vec<PaymentMethodSummary>,
    pub store_unavailable: bool,
}

/// Number of casinos shown on the overview.
pub const TOP_RATED: usize = 3;

/// Read side of the catalog.
pub struct CatalogService<S> {
    store: S,
}

impl<S: RecordStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch active casinos, degrading a store failure to an empty list.
    async fn casinos(&self) -> (Vec<CasinoRecord>, bool) {
        degrade("casinos", self.store.fetch_all_casinos().await)
    }

    async fn all_games(&self) -> (Vec<GameRecord>, bool) {
        degrade("games", self.store.fetch_all_games().await)
    }

    /// Filter and sort the casino list.
    pub async fn list(&self, query: &CatalogQuery) -> CatalogView {
        let (casinos, store_unavailable) = self.casinos().await;
        let result = query.apply(&casinos);
        log::debug!(
            "Listing: {} of {} casinos ({} filters)",
            result.len(),
            casinos.len(),
            query.criteria.count()
        );

        CatalogView {
            total: casinos.len(),
            casinos: result,
            active_filter_count: query.criteria.count(),
            store_unavailable,
        }
    }

    /// Build the comparison table for a selection.
    ///
    /// Ids that no longer resolve are reported in `table.dropped`.
    pub async fn comparison(&self, selection: &ComparisonSelection) -> ComparisonView {
        if selection.is_empty() {
            return ComparisonView::default();
        }
        let (casinos, store_unavailable) = self.casinos().await;
        let table = ComparisonTable::build(selection, &casinos);
        for id in &table.dropped {
            log::info!("Comparison id {} did not resolve", id);
        }
        ComparisonView {
            table,
            store_unavailable,
        }
    }

    /// Casino detail page lookup.
    pub async fn casino_by_slug(&self, slug: &str) -> Result<Option<CasinoRecord>> {
        self.store.fetch_casino_by_slug(slug).await
    }

    pub async fn game_by_slug(&self, slug: &str) -> Result<Option<GameRecord>> {
        self.store.fetch_game_by_slug(slug).await
    }

    pub async fn games(&self, query: &GameQuery) -> Vec<GameRecord> {
        let (games, _) = self.all_games().await;
        query.apply(&games)
    }

    pub async fn payment_methods(&self) -> Vec<PaymentMethodSummary> {
        let (casinos, _) = self.casinos().await;
        payment_method_index(&casinos)
    }

    /// Casinos and games fetched concurrently for the landing page.
    pub async fn overview(&self) -> CatalogOverview {
        let ((casinos, casinos_down), (games, games_down)) = join!(self.casinos(), self.all_games());

        CatalogOverview {
            top_rated: casinos.iter().take(TOP_RATED).cloned().collect(),
            casino_count: casinos.len(),
            game_count: games.len(),
            payment_methods: payment_method_index(&casinos),
            store_unavailable: casinos_down || games_down,
        }
    }
}

fn degrade<T>(what: &str, fetched: Result<Vec<T>>) -> (Vec<T>, bool) {
    match fetched {
        Ok(records) => (records, false),
        Err(e) => {
            log::warn!("Failed to fetch {}: {}", what, e);
            (Vec::new(), true)
        }
    }
}
