// src/models/locale.rs

//! Localized display strings (Spanish for Mexico by default, English).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

/// Localized message templates.
///
/// Templates use `{name}` placeholders replaced at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub messages: MessageLocale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLocale {
    /// "{count} casinos found"
    pub results_found: String,
    pub no_results: String,
    /// "{count} active filters"
    pub active_filters: String,
    pub comparison_header: String,
    pub comparison_empty: String,
    /// "{id} is no longer available"
    pub comparison_dropped: String,
    pub comparison_full: String,
    pub best_value: String,
    pub store_unavailable: String,
    /// "{name} saved"
    pub record_saved: String,
    /// "Could not save {name}: {error}"
    pub record_save_failed: String,
    pub record_deleted: String,
    pub name_required: String,
    pub label_rating: String,
    pub label_bonus: String,
    pub label_games: String,
    pub label_wagering: String,
    pub label_withdrawal: String,
    pub label_payments: String,
}

impl LocaleConfig {
    /// Built-in messages for a language.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Es => Self::spanish(),
            Language::En => Self::english(),
        }
    }

    /// Load message overrides from a TOML file.
    ///
    /// Keys missing from the file keep the built-in text for `language`.
    pub fn load(path: impl AsRef<Path>, language: Language) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::merge(&content, language)
    }

    fn merge(content: &str, language: Language) -> Result<Self> {
        let overrides: toml::Table = toml::from_str(content)?;
        let mut merged = toml::Value::try_from(Self::for_language(language))?;

        if let (Some(toml::Value::Table(messages)), Some(toml::Value::Table(base))) =
            (overrides.get("messages"), merged.get_mut("messages"))
        {
            for (key, value) in messages {
                if !base.contains_key(key) {
                    log::warn!("Unknown locale message key: {}", key);
                }
                base.insert(key.clone(), value.clone());
            }
        }
        Ok(merged.try_into()?)
    }

    /// Load messages from a file, falling back to the built-in language set.
    pub fn load_or_default(path: Option<&Path>, language: Language) -> Self {
        match path {
            Some(path) => Self::load(path, language).unwrap_or_else(|e| {
                log::warn!("Locale load failed from {:?}: {}. Using defaults.", path, e);
                Self::for_language(language)
            }),
            None => Self::for_language(language),
        }
    }

    fn spanish() -> Self {
        Self {
            messages: MessageLocale {
                results_found: "{count} casinos encontrados".into(),
                no_results: "No se encontraron casinos con estos filtros".into(),
                active_filters: "{count} filtros activos".into(),
                comparison_header: "Comparación de casinos".into(),
                comparison_empty: "Selecciona hasta 4 casinos para comparar".into(),
                comparison_dropped: "{id} ya no está disponible".into(),
                comparison_full: "Solo puedes comparar hasta 4 casinos".into(),
                best_value: "Mejor".into(),
                store_unavailable: "No pudimos cargar los casinos. Intenta más tarde.".into(),
                record_saved: "{name} guardado".into(),
                record_save_failed: "No se pudo guardar {name}: {error}".into(),
                record_deleted: "Registro {id} eliminado".into(),
                name_required: "El nombre es obligatorio".into(),
                label_rating: "Calificación".into(),
                label_bonus: "Bono".into(),
                label_games: "Juegos".into(),
                label_wagering: "Rollover".into(),
                label_withdrawal: "Retiros".into(),
                label_payments: "Métodos de pago".into(),
            },
        }
    }

    fn english() -> Self {
        Self {
            messages: MessageLocale {
                results_found: "{count} casinos found".into(),
                no_results: "No casinos match these filters".into(),
                active_filters: "{count} active filters".into(),
                comparison_header: "Casino comparison".into(),
                comparison_empty: "Select up to 4 casinos to compare".into(),
                comparison_dropped: "{id} is no longer available".into(),
                comparison_full: "You can compare up to 4 casinos".into(),
                best_value: "Best".into(),
                store_unavailable: "We could not load casinos. Please try again later.".into(),
                record_saved: "{name} saved".into(),
                record_save_failed: "Could not save {name}: {error}".into(),
                record_deleted: "Record {id} deleted".into(),
                name_required: "Name is required".into(),
                label_rating: "Rating".into(),
                label_bonus: "Bonus".into(),
                label_games: "Games".into(),
                label_wagering: "Wagering".into(),
                label_withdrawal: "Withdrawals".into(),
                label_payments: "Payment methods".into(),
            },
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

/// Fill `{key}` placeholders in a message template.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
