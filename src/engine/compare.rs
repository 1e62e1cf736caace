// src/engine/compare.rs

//! Bounded casino selection and "best value" highlighting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::CasinoRecord;

/// Maximum number of casinos compared side by side.
pub const MAX_COMPARE: usize = 4;

/// Ordered selection of at most [`MAX_COMPARE`] casino ids.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from ids, dropping blanks, duplicates and overflow.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for id in ids {
            let id = id.into();
            let id = id.trim();
            if !id.is_empty() && !selection.contains(id) && !selection.is_full() {
                selection.ids.push(id.to_string());
            }
        }
        selection
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    /// Remove `id` if selected, otherwise append it while below the cap.
    ///
    /// Toggling a new id into a full selection returns it unchanged, as
    /// does a blank id.
    pub fn toggle(&self, id: &str) -> Self {
        let id = id.trim();
        let mut next = self.clone();
        if id.is_empty() {
            return next;
        }
        if let Some(pos) = next.ids.iter().position(|s| s == id) {
            next.ids.remove(pos);
        } else if !next.is_full() {
            next.ids.push(id.to_string());
        }
        next
    }

    pub fn remove(&self, id: &str) -> Self {
        Self {
            ids: self.ids.iter().filter(|s| *s != id).cloned().collect(),
        }
    }

    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Resolve ids against a snapshot, in selection order.
    ///
    /// Ids missing from the snapshot are dropped, so the result may be
    /// shorter than the selection.
    pub fn materialize(&self, casinos: &[CasinoRecord]) -> Vec<CasinoRecord> {
        self.ids
            .iter()
            .filter_map(|id| casinos.iter().find(|c| &c.id == id).cloned())
            .collect()
    }
}

/// Attribute compared across the selected casinos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareField {
    Rating,
    BonusAmount,
    GamesTotal,
    Wagering,
}

impl CompareField {
    pub const ALL: [CompareField; 4] = [
        CompareField::Rating,
        CompareField::BonusAmount,
        CompareField::GamesTotal,
        CompareField::Wagering,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CompareField::Rating => "rating",
            CompareField::BonusAmount => "bonusAmount",
            CompareField::GamesTotal => "gamesTotal",
            CompareField::Wagering => "wagering",
        }
    }

    /// Lower wagering is better; every other field is better when higher.
    pub fn lower_is_better(self) -> bool {
        matches!(self, CompareField::Wagering)
    }

    pub fn value(self, casino: &CasinoRecord) -> f64 {
        match self {
            CompareField::Rating => casino.rating,
            CompareField::BonusAmount => casino.bonus.amount,
            CompareField::GamesTotal => f64::from(casino.games.total),
            CompareField::Wagering => f64::from(casino.bonus.wagering_requirement),
        }
    }
}

impl fmt::Display for CompareField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best value of `field` across `casinos`, or `None` when there are none.
pub fn best_value(casinos: &[CasinoRecord], field: CompareField) -> Option<f64> {
    let values = casinos.iter().map(|c| field.value(c));
    if field.lower_is_better() {
        values.min_by(f64::total_cmp)
    } else {
        values.max_by(f64::total_cmp)
    }
}

/// Whether a casino holds the best value; ties flag every holder.
pub fn is_best(casino: &CasinoRecord, field: CompareField, best: Option<f64>) -> bool {
    best.is_some_and(|b| field.value(casino) == b)
}

/// One cell of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCell {
    pub field: CompareField,
    pub value: f64,
    pub best: bool,
}

/// One column of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonColumn {
    pub casino: CasinoRecord,
    pub cells: Vec<ComparisonCell>,
}

/// Side-by-side view of the resolved selection.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ComparisonTable {
    pub columns: Vec<ComparisonColumn>,
    /// Selected ids that did not resolve to a record
    pub dropped: Vec<String>,
}

impl ComparisonTable {
    pub fn build(selection: &ComparisonSelection, casinos: &[CasinoRecord]) -> Self {
        let compared = selection.materialize(casinos);
        let bests: Vec<(CompareField, Option<f64>)> = CompareField::ALL
            .into_iter()
            .map(|f| (f, best_value(&compared, f)))
            .collect();

        let dropped = selection
            .ids()
            .iter()
            .filter(|id| !compared.iter().any(|c| &c.id == *id))
            .cloned()
            .collect();

        let columns = compared
            .into_iter()
            .map(|casino| {
                let cells = bests
                    .iter()
                    .map(|(field, best)| ComparisonCell {
                        field: *field,
                        value: field.value(&casino),
                        best: is_best(&casino, *field, *best),
                    })
                    .collect();
                ComparisonColumn { casino, cells }
            })
            .collect();

        Self { columns, dropped }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
