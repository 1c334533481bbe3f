//! Market baseline: median price per m² by property type.
//!
//! Only the "market subset" feeds the baseline (declared value above
//! `MARKET_MIN_VALUE`) so placeholder listings such as `R$ 0,10` cannot drag
//! the reference down. Lookups fall back to the median over the whole subset
//! when a type has no entry.

use std::collections::BTreeMap;

use crate::domain::CanonicalRecord;
use crate::math::median;

/// Records must declare strictly more than this to enter the market subset.
pub const MARKET_MIN_VALUE: f64 = 100.0;

/// Per-type reference entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub median_price_per_area: f64,
    /// Number of market-subset records of this type.
    pub sample_size: usize,
}

/// Per-type median price per m² plus a global fallback scalar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketReference {
    by_type: BTreeMap<String, TypeReference>,
    fallback: f64,
    subset_size: usize,
}

impl MarketReference {
    /// Build the baseline from a canonicalized batch.
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let subset: Vec<&CanonicalRecord> = records
            .iter()
            .filter(|r| r.value > MARKET_MIN_VALUE)
            .collect();

        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for r in &subset {
            groups
                .entry(r.property_type.as_str())
                .or_default()
                .push(r.price_per_area);
        }

        let by_type = groups
            .into_iter()
            .filter_map(|(kind, values)| {
                let sample_size = values.len();
                median(values).map(|m| {
                    (
                        kind.to_string(),
                        TypeReference {
                            median_price_per_area: m,
                            sample_size,
                        },
                    )
                })
            })
            .collect();

        let fallback = median(subset.iter().map(|r| r.price_per_area).collect()).unwrap_or(0.0);

        Self {
            by_type,
            fallback,
            subset_size: subset.len(),
        }
    }

    /// Reference price per m² for `property_type`: its group median if
    /// present, else the global fallback.
    pub fn lookup(&self, property_type: &str) -> f64 {
        self.by_type
            .get(property_type)
            .map(|t| t.median_price_per_area)
            .unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Number of records that passed the market-subset filter.
    pub fn subset_size(&self) -> usize {
        self.subset_size
    }

    /// Per-type entries, sorted by type name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TypeReference)> {
        self.by_type.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NOT_INFORMED;

    fn rec(kind: &str, value: f64, area: f64) -> CanonicalRecord {
        CanonicalRecord {
            value,
            area,
            location: String::new(),
            registration: "1".to_string(),
            property_type: kind.to_string(),
            price_per_area: if area > 0.0 { value / area } else { 0.0 },
        }
    }

    #[test]
    fn per_type_medians_and_fallback() {
        let records = vec![
            rec("Casa", 100_000.0, 100.0),  // 1000
            rec("Casa", 300_000.0, 100.0),  // 3000
            rec("Casa", 200_000.0, 100.0),  // 2000
            rec("Apto", 500_000.0, 100.0),  // 5000
            rec("Apto", 700_000.0, 100.0),  // 7000
        ];
        let reference = MarketReference::from_records(&records);

        assert_eq!(reference.lookup("Casa"), 2000.0);
        assert_eq!(reference.lookup("Apto"), 6000.0);
        // Overall: [1000, 2000, 3000, 5000, 7000]
        assert_eq!(reference.fallback(), 3000.0);
        assert_eq!(reference.lookup("Terreno"), 3000.0);
        assert_eq!(reference.subset_size(), 5);
    }

    #[test]
    fn placeholder_values_stay_out_of_the_subset() {
        let records = vec![
            rec("Casa", 100.0, 1.0),
            rec("Casa", 0.1, 50.0),
            rec("Casa", 1_000.0, 10.0),
        ];
        let reference = MarketReference::from_records(&records);
        assert_eq!(reference.subset_size(), 1);
        assert_eq!(reference.lookup("Casa"), 100.0);
    }

    #[test]
    fn empty_subset_has_zero_fallback() {
        let reference = MarketReference::from_records(&[rec("Casa", 5.0, 10.0)]);
        assert!(reference.is_empty());
        assert_eq!(reference.fallback(), 0.0);
        assert_eq!(reference.lookup("Casa"), 0.0);

        let reference = MarketReference::from_records(&[]);
        assert_eq!(reference.lookup("anything"), 0.0);
    }

    #[test]
    fn untyped_records_share_a_baseline() {
        let records = vec![rec(NOT_INFORMED, 10_000.0, 10.0), rec(NOT_INFORMED, 30_000.0, 10.0)];
        let reference = MarketReference::from_records(&records);
        assert_eq!(reference.lookup(NOT_INFORMED), 2000.0);
    }

    #[test]
    fn zero_area_listings_count_with_zero_price() {
        let records = vec![
            rec("Casa", 50_000.0, 0.0),
            rec("Casa", 50_000.0, 10.0),
            rec("Casa", 90_000.0, 10.0),
        ];
        let reference = MarketReference::from_records(&records);
        // [0, 5000, 9000]
        assert_eq!(reference.lookup("Casa"), 5000.0);
    }
}
