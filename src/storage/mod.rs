//! Client-side persistence, standing in for browser local storage.
//!
//! Only the comparison selection is persisted; filter state lives in the
//! URL and is never stored.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! └── comparison.json      # ["casino-id", ...] (at most 4)
//! ```

pub mod local;

use async_trait::async_trait;

use crate::engine::ComparisonSelection;
use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Key of the persisted comparison selection.
pub const COMPARISON_KEY: &str = "comparison.json";

/// Trait for client storage backends.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Restore the comparison selection; empty when nothing was saved.
    async fn load_selection(&self) -> Result<ComparisonSelection>;

    /// Persist the comparison selection, replacing any previous one.
    async fn save_selection(&self, selection: &ComparisonSelection) -> Result<()>;
}
