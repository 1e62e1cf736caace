//! Utility functions and helpers.

pub mod http;
pub mod query;
pub mod slug;

pub use slug::slugify;
