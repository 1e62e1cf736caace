// src/engine/payments.rs

//! Payment-method index for the payment method pages.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::CasinoRecord;

/// Casinos accepting one payment method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodSummary {
    pub name: String,
    /// Accepting casinos, in snapshot order
    pub casino_ids: Vec<String>,
    pub best_rating: f64,
}

impl PaymentMethodSummary {
    pub fn casino_count(&self) -> usize {
        self.casino_ids.len()
    }
}

/// Group active casinos by payment method name (exact match).
///
/// Sorted by number of casinos, most first, then by name.
pub fn payment_method_index(casinos: &[CasinoRecord]) -> Vec<PaymentMethodSummary> {
    let mut by_name: HashMap<&str, PaymentMethodSummary> = HashMap::new();

    for casino in casinos.iter().filter(|c| c.is_active()) {
        for method in &casino.payment_methods {
            let entry = by_name
                .entry(method.as_str())
                .or_insert_with(|| PaymentMethodSummary {
                    name: method.clone(),
                    casino_ids: Vec::new(),
                    best_rating: f64::MIN,
                });
            if !entry.casino_ids.contains(&casino.id) {
                entry.casino_ids.push(casino.id.clone());
                entry.best_rating = entry.best_rating.max(casino.rating);
            }
        }
    }

    let mut index: Vec<_> = by_name.into_values().collect();
    index.sort_by(|a, b| {
        b.casino_count()
            .cmp(&a.casino_count())
            .then_with(|| a.name.cmp(&b.name))
    });
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;

    fn casino(id: &str, rating: f64, methods: &[&str]) -> CasinoRecord {
        let mut c = CasinoRecord::new(id, id, id);
        c.rating = rating;
        c.payment_methods = methods.iter().map(|m| m.to_string()).collect();
        c
    }

    #[test]
    fn test_index_ordering() {
        let mut hidden = casino("d", 5.0, &["Bitcoin"]);
        hidden.status = RecordStatus::Inactive;

        let casinos = vec![
            casino("a", 4.2, &["OXXO", "Visa"]),
            casino("b", 4.7, &["SPEI", "OXXO", "OXXO"]),
            casino("c", 3.9, &["Visa"]),
            hidden,
        ];
        let index = payment_method_index(&casinos);

        let names: Vec<_> = index.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["OXXO", "Visa", "SPEI"]);

        assert_eq!(index[0].casino_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(index[0].best_rating, 4.7);
        assert_eq!(index[1].best_rating, 4.2);
    }

    #[test]
    fn test_index_empty() {
        assert!(payment_method_index(&[]).is_empty());
    }
}
