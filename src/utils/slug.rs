// src/utils/slug.rs

//! URL slug derivation.

use std::sync::OnceLock;

use regex::Regex;

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

/// Derive a URL slug from a display name.
///
/// Lowercases, collapses every run of non `[a-z0-9]` characters into a
/// single hyphen and trims hyphens from both ends.
///
/// # Examples
/// ```
/// use casino_catalog::utils::slug::slugify;
///
/// assert_eq!(slugify("Bet 365!"), "bet-365");
/// ```
pub fn slugify(name: &str) -> String {
    separator_runs()
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
