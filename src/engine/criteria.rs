// src/engine/criteria.rs

//! Filter criteria and active-filter accounting.
//!
//! Each dimension is a closed enum. Literals that do not parse (from a URL
//! or a CLI flag) become "no filter" for that dimension instead of errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum deposit bucket, inclusive at both ends.
///
/// Adjacent buckets share their boundary value: a deposit of exactly 100
/// passes both `0-100` and `100-200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositBucket {
    #[serde(rename = "0-100")]
    UpTo100,
    #[serde(rename = "100-200")]
    From100To200,
    #[serde(rename = "200-500")]
    From200To500,
    #[serde(rename = "500+")]
    From500,
}

impl DepositBucket {
    pub const ALL: [DepositBucket; 4] = [
        DepositBucket::UpTo100,
        DepositBucket::From100To200,
        DepositBucket::From200To500,
        DepositBucket::From500,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DepositBucket::UpTo100 => "0-100",
            DepositBucket::From100To200 => "100-200",
            DepositBucket::From200To500 => "200-500",
            DepositBucket::From500 => "500+",
        }
    }

    pub fn parse(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == literal.trim())
    }

    pub fn contains(self, min_deposit: f64) -> bool {
        match self {
            DepositBucket::UpTo100 => min_deposit <= 100.0,
            DepositBucket::From100To200 => (100.0..=200.0).contains(&min_deposit),
            DepositBucket::From200To500 => (200.0..=500.0).contains(&min_deposit),
            DepositBucket::From500 => min_deposit >= 500.0,
        }
    }
}

/// Game type a casino must offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Slots,
    Live,
    Table,
    Sports,
    Poker,
}

impl GameType {
    pub const ALL: [GameType; 5] = [
        GameType::Slots,
        GameType::Live,
        GameType::Table,
        GameType::Sports,
        GameType::Poker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameType::Slots => "slots",
            GameType::Live => "live",
            GameType::Table => "table",
            GameType::Sports => "sports",
            GameType::Poker => "poker",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag.trim())
    }
}

/// Withdrawal speed bucket, matched against free-text descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalBucket {
    #[serde(rename = "instant")]
    Instant,
    #[serde(rename = "24h")]
    Within24h,
    #[serde(rename = "48h")]
    Within48h,
    #[serde(rename = "72h")]
    Within72h,
}

impl WithdrawalBucket {
    pub const ALL: [WithdrawalBucket; 4] = [
        WithdrawalBucket::Instant,
        WithdrawalBucket::Within24h,
        WithdrawalBucket::Within48h,
        WithdrawalBucket::Within72h,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WithdrawalBucket::Instant => "instant",
            WithdrawalBucket::Within24h => "24h",
            WithdrawalBucket::Within48h => "48h",
            WithdrawalBucket::Within72h => "72h",
        }
    }

    pub fn parse(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == literal.trim())
    }

    /// Substrings that identify the bucket in a lower-cased description.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            WithdrawalBucket::Instant => &["instant", "2-24"],
            WithdrawalBucket::Within24h => &["24"],
            WithdrawalBucket::Within48h => &["48"],
            WithdrawalBucket::Within72h => &["72"],
        }
    }
}

/// License requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LicenseType {
    #[default]
    All,
    /// Licensed by the Mexican gaming regulator (SEGOB / DGJS)
    Segob,
}

impl LicenseType {
    pub fn as_str(self) -> &'static str {
        match self {
            LicenseType::All => "all",
            LicenseType::Segob => "segob",
        }
    }

    /// Unknown literals fall back to `All`.
    pub fn parse(literal: &str) -> Self {
        match literal.trim() {
            "segob" => LicenseType::Segob,
            _ => LicenseType::All,
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(DepositBucket, GameType, WithdrawalBucket, LicenseType);

/// User-selected narrowing predicates for the casino list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Any match passes
    #[serde(default)]
    pub payment_methods: Vec<String>,

    #[serde(default)]
    pub min_deposit: Option<DepositBucket>,

    /// Every selected type must pass
    #[serde(default)]
    pub game_types: Vec<GameType>,

    #[serde(default)]
    pub withdrawal_time: Option<WithdrawalBucket>,

    #[serde(default)]
    pub license_type: LicenseType,
}

/// One removable filter, as shown on an "active filter" chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDimension {
    PaymentMethod(String),
    GameType(GameType),
    MinDeposit,
    WithdrawalTime,
    LicenseType,
}

impl FilterCriteria {
    /// Add a payment method unless already selected.
    pub fn add_payment_method(&mut self, method: impl Into<String>) {
        let method = method.into();
        if !method.is_empty() && !self.payment_methods.contains(&method) {
            self.payment_methods.push(method);
        }
    }

    /// Select a game type unless already selected.
    pub fn add_game_type(&mut self, game_type: GameType) {
        if !self.game_types.contains(&game_type) {
            self.game_types.push(game_type);
        }
    }

    /// Number of active filters for the UI badge.
    pub fn count(&self) -> usize {
        self.payment_methods.len()
            + self.game_types.len()
            + usize::from(self.min_deposit.is_some())
            + usize::from(self.withdrawal_time.is_some())
            + usize::from(self.license_type != LicenseType::All)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Return a copy with one filter removed.
    pub fn remove_one(&self, dimension: &FilterDimension) -> Self {
        let mut next = self.clone();
        match dimension {
            FilterDimension::PaymentMethod(method) => {
                if let Some(pos) = next.payment_methods.iter().position(|m| m == method) {
                    next.payment_methods.remove(pos);
                }
            }
            FilterDimension::GameType(game_type) => {
                if let Some(pos) = next.game_types.iter().position(|t| t == game_type) {
                    next.game_types.remove(pos);
                }
            }
            FilterDimension::MinDeposit => next.min_deposit = None,
            FilterDimension::WithdrawalTime => next.withdrawal_time = None,
            FilterDimension::LicenseType => next.license_type = LicenseType::All,
        }
        next
    }

    /// Return a copy with every dimension reset.
    pub fn clear_all(&self) -> Self {
        Self::default()
    }

    /// The individually removable filters currently active, in display order.
    pub fn active_dimensions(&self) -> Vec<FilterDimension> {
        let mut dims: Vec<FilterDimension> = self
            .payment_methods
            .iter()
            .cloned()
            .map(FilterDimension::PaymentMethod)
            .collect();
        if self.min_deposit.is_some() {
            dims.push(FilterDimension::MinDeposit);
        }
        dims.extend(self.game_types.iter().copied().map(FilterDimension::GameType));
        if self.withdrawal_time.is_some() {
            dims.push(FilterDimension::WithdrawalTime);
        }
        if self.license_type != LicenseType::All {
            dims.push(FilterDimension::LicenseType);
        }
        dims
    }
}
