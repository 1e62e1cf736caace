//! Admin CRUD form model.
//!
//! Records are edited as drafts, then written wholesale to the record store
//! through an [`AdminSession`].

pub mod draft;
pub mod session;

pub use draft::{CasinoDraft, CasinoListField, GameDraft};
pub use session::{AdminSession, Alert};
