// Event-type catalog - Labels and their relative sampling weights
// Validated at construction; owns the prepared weighted distribution

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("event catalog is empty")]
    Empty,

    #[error("weight for \"{label}\" must be a finite non-negative number, got {weight}")]
    InvalidWeight { label: String, weight: f64 },

    #[error("all catalog weights are zero")]
    AllZero,

    #[error("failed to build weighted distribution: {0}")]
    Distribution(String),
}

/// One catalog entry: an event-type label and its relative weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub label: String,
    pub weight: f64,
}

/// The set of available event-type labels and their sampling weights
///
/// Weights are relative and need not sum to 1. The catalog is immutable
/// after construction; validation happens once, up front, so drawing from
/// it can never fail.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    entries: Vec<CatalogEntry>,
    dist: WeightedIndex<f64>,
}

impl EventCatalog {
    /// Build a catalog from (label, weight) pairs, preserving their order
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut total = 0.0;
        for entry in &entries {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(CatalogError::InvalidWeight {
                    label: entry.label.clone(),
                    weight: entry.weight,
                });
            }
            total += entry.weight;
        }
        if total == 0.0 {
            return Err(CatalogError::AllZero);
        }

        let dist = WeightedIndex::new(entries.iter().map(|e| e.weight))
            .map_err(|e| CatalogError::Distribution(e.to_string()))?;

        Ok(EventCatalog { entries, dist })
    }

    /// Build a catalog from a label -> weight map
    ///
    /// BTreeMap iteration is sorted by label, so the entry order (and with
    /// it the behavior of a seeded sampler) is deterministic.
    pub fn from_weights(weights: &BTreeMap<String, f64>) -> Result<Self, CatalogError> {
        let entries = weights
            .iter()
            .map(|(label, &weight)| CatalogEntry {
                label: label.clone(),
                weight,
            })
            .collect();
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    /// Draw a label with probability proportional to its weight
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &str {
        let idx = self.dist.sample(rng);
        &self.entries[idx].label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn catalog(pairs: &[(&str, f64)]) -> Result<EventCatalog, CatalogError> {
        EventCatalog::from_entries(
            pairs
                .iter()
                .map(|(label, weight)| CatalogEntry {
                    label: label.to_string(),
                    weight: *weight,
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = EventCatalog::from_entries(Vec::new());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = catalog(&[("bell", 10.0), ("knock", -1.0)]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_nan_weight_rejected() {
        let result = catalog(&[("bell", f64::NAN)]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let result = catalog(&[("bell", 0.0), ("knock", 0.0)]);
        assert!(matches!(result, Err(CatalogError::AllZero)));
    }

    #[test]
    fn test_single_label_always_chosen() {
        let catalog = catalog(&[("doorCupboard", 10.0)]).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(catalog.choose(&mut rng), "doorCupboard");
        }
    }

    #[test]
    fn test_zero_weight_label_never_chosen() {
        let catalog = catalog(&[("bell", 10.0), ("silent", 0.0)]).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(11);

        for _ in 0..200 {
            assert_eq!(catalog.choose(&mut rng), "bell");
        }
    }

    #[test]
    fn test_choose_covers_all_positive_labels() {
        let catalog = catalog(&[("bell", 10.0), ("knock", 15.0), ("waterTap", 15.0)]).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(3);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(catalog.choose(&mut rng).to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_from_weights_sorted_by_label() {
        let mut weights = BTreeMap::new();
        weights.insert("waterTap".to_string(), 15.0);
        weights.insert("bell".to_string(), 10.0);
        weights.insert("knock".to_string(), 15.0);

        let catalog = EventCatalog::from_weights(&weights).unwrap();
        let labels: Vec<&str> = catalog.labels().collect();
        assert_eq!(labels, vec!["bell", "knock", "waterTap"]);
        assert!(catalog.contains("knock"));
        assert!(!catalog.contains("laughter"));
    }
}
