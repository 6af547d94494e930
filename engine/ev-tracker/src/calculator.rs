use crate::models::{EvRow, PricedRow};
use std::collections::BTreeMap;
use tracing::info;

/// Expected value calculator for per-set summaries
pub struct EvCalculator;

impl EvCalculator {
    /// Sum `price * pull_rate` per set.
    ///
    /// Returns one row per distinct set, ordered by set name, each stamped with
    /// `run_date`. Cards without a price contribute 0 but still make their set appear.
    pub fn summarize(rows: &[PricedRow], run_date: &str) -> Vec<EvRow> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

        for priced in rows {
            *totals.entry(priced.row.set_name.as_str()).or_insert(0.0) += priced.ev_contribution();
        }

        let summary: Vec<EvRow> = totals
            .into_iter()
            .map(|(set_name, expected_value)| EvRow {
                set_name: set_name.to_string(),
                expected_value,
                date: run_date.to_string(),
            })
            .collect();

        for row in &summary {
            info!("EV for {} on {}: {:.4}", row.set_name, row.date, row.expected_value);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryRow;

    fn priced(set_name: &str, price: f64, pull_rate: f64) -> PricedRow {
        PricedRow::new(
            InventoryRow { card_id: "x-1".to_string(), set_name: set_name.to_string(), pull_rate },
            price,
        )
    }

    #[test]
    fn test_grouped_expected_value() {
        let rows = vec![priced("A", 10.0, 0.5), priced("A", 4.0, 0.25), priced("B", 20.0, 0.1)];

        let summary = EvCalculator::summarize(&rows, "2026-01-01");

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].set_name, "A");
        assert!((summary[0].expected_value - 6.0).abs() < 1e-12);
        assert_eq!(summary[1].set_name, "B");
        assert!((summary[1].expected_value - 2.0).abs() < 1e-12);
        assert!(summary.iter().all(|row| row.date == "2026-01-01"));
    }

    #[test]
    fn test_sets_sorted_by_name() {
        let rows = vec![priced("Zeta", 1.0, 1.0), priced("Alpha", 1.0, 1.0), priced("Mid", 1.0, 1.0)];

        let names: Vec<_> =
            EvCalculator::summarize(&rows, "2026-01-01").into_iter().map(|r| r.set_name).collect();

        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_unpriced_set_still_reported() {
        let rows = vec![priced("Promo", 0.0, 0.3)];

        let summary = EvCalculator::summarize(&rows, "2026-01-01");

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].expected_value, 0.0);
    }

    #[test]
    fn test_empty_inventory() {
        assert!(EvCalculator::summarize(&[], "2026-01-01").is_empty());
    }
}
