// src/models/casino.rs

//! Casino record as served by the record store.

use serde::{Deserialize, Serialize};

/// Publication state of a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl RecordStatus {
    /// Only active records are surfaced to end users.
    pub fn is_active(self) -> bool {
        matches!(self, RecordStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
            RecordStatus::Pending => "pending",
        }
    }
}

/// Welcome bonus terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bonus {
    /// Bonus amount in MXN
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub amount: f64,

    /// Deposit match percentage
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub percentage: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_spins: Option<u32>,

    /// Minimum deposit required to claim the bonus
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub min_deposit: f64,

    /// Wagering multiplier (e.g. 35 for 35x)
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub wagering_requirement: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Game library counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameCounts {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slots: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub live: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub table: u32,
}

impl GameCounts {
    /// Whether the per-type counts fit inside the total.
    ///
    /// The store does not enforce this, so records may violate it.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.slots) + u64::from(self.live) + u64::from(self.table)
            <= u64::from(self.total)
    }
}

/// A casino listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasinoRecord {
    /// Opaque unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// URL key, unique across casinos
    pub slug: String,

    /// Editorial rating, 0.0 to 5.0
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rating: f64,

    /// Year the operator was established
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub established: i32,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub features: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub bonus: Bonus,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub games: GameCounts,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub payment_methods: Vec<String>,

    /// Free-text payout speed, e.g. "24-48 horas"
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub withdrawal_time: String,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub licenses: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pros: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub cons: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub currencies: Vec<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: RecordStatus,
}

impl CasinoRecord {
    /// Create a record with the given identity and empty attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            rating: 0.0,
            established: 0,
            features: Vec::new(),
            bonus: Bonus::default(),
            games: GameCounts::default(),
            payment_methods: Vec::new(),
            withdrawal_time: String::new(),
            licenses: Vec::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            currencies: Vec::new(),
            description: String::new(),
            affiliate_url: None,
            logo_url: None,
            status: RecordStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
