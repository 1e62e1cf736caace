// src/admin/draft.rs

//! Editable drafts of casino and game records.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Bonus, CasinoRecord, GameCategory, GameCounts, GameRecord, RecordStatus};
use crate::utils::slugify;

/// Repeated string fields of a casino draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasinoListField {
    Features,
    PaymentMethods,
    Licenses,
    Currencies,
    Pros,
    Cons,
}

impl CasinoListField {
    pub const ALL: [CasinoListField; 6] = [
        CasinoListField::Features,
        CasinoListField::PaymentMethods,
        CasinoListField::Licenses,
        CasinoListField::Currencies,
        CasinoListField::Pros,
        CasinoListField::Cons,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CasinoListField::Features => "features",
            CasinoListField::PaymentMethods => "payment_methods",
            CasinoListField::Licenses => "licenses",
            CasinoListField::Currencies => "currencies",
            CasinoListField::Pros => "pros",
            CasinoListField::Cons => "cons",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// Append a trimmed value; blank values are ignored.
fn push_trimmed(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    list.push(value.to_string());
    true
}

/// Remove by position; out-of-range indices are ignored.
fn remove_at(list: &mut Vec<String>, index: usize) -> Option<String> {
    (index < list.len()).then(|| list.remove(index))
}

/// Explicit slug if set, otherwise derived from the name.
fn resolve_slug(name: &str, slug: Option<&str>) -> String {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(explicit) => explicit.to_string(),
        None => slugify(name),
    }
}

fn required_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }
    Ok(name.to_string())
}

/// Draft of a casino record.
///
/// An empty `id` means "new record"; the slug doubles as its id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasinoDraft {
    pub id: String,
    pub name: String,
    /// Explicit slug; derived from `name` when unset
    pub slug: Option<String>,
    pub rating: f64,
    pub established: i32,
    pub features: Vec<String>,
    pub bonus: Bonus,
    pub games: GameCounts,
    pub payment_methods: Vec<String>,
    pub withdrawal_time: String,
    pub licenses: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub currencies: Vec<String>,
    pub description: String,
    pub affiliate_url: Option<String>,
    pub logo_url: Option<String>,
    pub status: RecordStatus,
}

impl CasinoDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn list(&self, field: CasinoListField) -> &[String] {
        match field {
            CasinoListField::Features => &self.features,
            CasinoListField::PaymentMethods => &self.payment_methods,
            CasinoListField::Licenses => &self.licenses,
            CasinoListField::Currencies => &self.currencies,
            CasinoListField::Pros => &self.pros,
            CasinoListField::Cons => &self.cons,
        }
    }

    fn list_mut(&mut self, field: CasinoListField) -> &mut Vec<String> {
        match field {
            CasinoListField::Features => &mut self.features,
            CasinoListField::PaymentMethods => &mut self.payment_methods,
            CasinoListField::Licenses => &mut self.licenses,
            CasinoListField::Currencies => &mut self.currencies,
            CasinoListField::Pros => &mut self.pros,
            CasinoListField::Cons => &mut self.cons,
        }
    }

    /// Append to a list field. Returns false if the value was blank.
    pub fn push(&mut self, field: CasinoListField, value: &str) -> bool {
        push_trimmed(self.list_mut(field), value)
    }

    /// Remove an entry from a list field by index.
    pub fn remove(&mut self, field: CasinoListField, index: usize) -> Option<String> {
        remove_at(self.list_mut(field), index)
    }

    pub fn slug(&self) -> String {
        resolve_slug(&self.name, self.slug.as_deref())
    }

    /// Validate and build the record to submit.
    pub fn to_record(&self) -> Result<CasinoRecord> {
        let name = required_name(&self.name)?;
        let slug = self.slug();
        let id = if self.id.trim().is_empty() {
            slug.clone()
        } else {
            self.id.trim().to_string()
        };

        Ok(CasinoRecord {
            id,
            name,
            slug,
            rating: self.rating,
            established: self.established,
            features: self.features.clone(),
            bonus: self.bonus.clone(),
            games: self.games,
            payment_methods: self.payment_methods.clone(),
            withdrawal_time: self.withdrawal_time.clone(),
            licenses: self.licenses.clone(),
            pros: self.pros.clone(),
            cons: self.cons.clone(),
            currencies: self.currencies.clone(),
            description: self.description.clone(),
            affiliate_url: self.affiliate_url.clone(),
            logo_url: self.logo_url.clone(),
            status: self.status,
        })
    }
}

impl From<CasinoRecord> for CasinoDraft {
    fn from(record: CasinoRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            slug: Some(record.slug),
            rating: record.rating,
            established: record.established,
            features: record.features,
            bonus: record.bonus,
            games: record.games,
            payment_methods: record.payment_methods,
            withdrawal_time: record.withdrawal_time,
            licenses: record.licenses,
            pros: record.pros,
            cons: record.cons,
            currencies: record.currencies,
            description: record.description,
            affiliate_url: record.affiliate_url,
            logo_url: record.logo_url,
            status: record.status,
        }
    }
}

/// Draft of a game record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDraft {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub provider: String,
    pub category: GameCategory,
    pub rtp: f64,
    pub volatility: String,
    pub min_bet: f64,
    pub max_bet: f64,
    pub features: Vec<String>,
    pub description: String,
    pub status: RecordStatus,
}

impl GameDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn push_feature(&mut self, value: &str) -> bool {
        push_trimmed(&mut self.features, value)
    }

    pub fn remove_feature(&mut self, index: usize) -> Option<String> {
        remove_at(&mut self.features, index)
    }

    pub fn slug(&self) -> String {
        resolve_slug(&self.name, self.slug.as_deref())
    }

    pub fn to_record(&self) -> Result<GameRecord> {
        let name = required_name(&self.name)?;
        let slug = self.slug();
        let id = if self.id.trim().is_empty() {
            slug.clone()
        } else {
            self.id.trim().to_string()
        };

        Ok(GameRecord {
            id,
            name,
            slug,
            provider: self.provider.clone(),
            category: self.category,
            rtp: self.rtp,
            volatility: self.volatility.clone(),
            min_bet: self.min_bet,
            max_bet: self.max_bet,
            features: self.features.clone(),
            description: self.description.clone(),
            status: self.status,
        })
    }
}

impl From<GameRecord> for GameDraft {
    fn from(record: GameRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            slug: Some(record.slug),
            provider: record.provider,
            category: record.category,
            rtp: record.rtp,
            volatility: record.volatility,
            min_bet: record.min_bet,
            max_bet: record.max_bet,
            features: record.features,
            description: record.description,
            status: record.status,
        }
    }
}
