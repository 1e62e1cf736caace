//! Service layer for the catalog.
//!
//! - Listing, comparison and detail lookups (`CatalogService`)

mod catalog;

pub use catalog::{CatalogOverview, CatalogService, CatalogView, ComparisonView, TOP_RATED};
