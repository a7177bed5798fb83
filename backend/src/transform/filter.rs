//! Narrowing the dataset by the dashboard's dropdown selection.
//!
//! All active dimensions are AND-combined. Comparisons are exact,
//! case-sensitive string equality. The input is never modified.

use crate::models::{FilterSelection, Record};
use crate::period::extract_period;

/// Records matching `selection`, in input order.
pub fn apply_filters<'a>(records: &'a [Record], selection: &FilterSelection) -> Vec<&'a Record> {
    if selection.is_empty() {
        return records.iter().collect();
    }

    records
        .iter()
        .filter(|record| matches_all(record, selection))
        .collect()
}

/// Check whether a single record passes every active dimension.
pub fn matches_all(record: &Record, selection: &FilterSelection) -> bool {
    if let Some(contract) = selection.contract() {
        if record.contract() != contract {
            return false;
        }
    }

    if let Some(coordination) = selection.coordination() {
        if record.coordination() != coordination {
            return false;
        }
    }

    if let Some(work_type) = selection.work_type() {
        if record.work_type() != work_type {
            return false;
        }
    }

    // A record without a derivable period never matches a period filter,
    // since the active filter value is never empty.
    if let Some(period) = selection.period() {
        if extract_period(record.planned_start()) != period {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(contract: &str, coordination: &str, work_type: &str, start: &str) -> Record {
        [
            ("contrato", contract),
            ("coordenacao", coordination),
            ("tipodeobra", work_type),
            ("previsaodeinicio", start),
        ]
        .into_iter()
        .collect()
    }

    fn sample() -> Vec<Record> {
        vec![
            record("C1", "Norte", "Linear", "05/07/2026"),
            record("C2", "Sul", "Localizada", "2026-08-01"),
            record("C1", "Sul", "Linear", ""),
            record("C3", "Norte", "Localizada", "12/07/2026"),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default());

        assert_eq!(filtered.len(), records.len());
        for (kept, original) in filtered.iter().zip(records.iter()) {
            assert_eq!(*kept, original);
        }
    }

    #[test]
    fn test_empty_input() {
        let filtered = apply_filters(&[], &FilterSelection::default().with_contract("C1"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_contract_filter() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default().with_contract("C1"));

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.contract() == "C1"));
    }

    #[test]
    fn test_filters_are_and_combined() {
        let records = sample();
        let selection = FilterSelection::default()
            .with_coordination("Sul")
            .with_work_type("Linear");
        let filtered = apply_filters(&records, &selection);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].contract(), "C1");
        assert_eq!(filtered[0].coordination(), "Sul");
    }

    #[test]
    fn test_period_filter_uses_derived_period() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default().with_period("2026-07"));

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].contract(), "C1");
        assert_eq!(filtered[1].contract(), "C3");
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default().with_work_type("linear"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_unknown_contract_matches_nothing() {
        let records = sample();
        let filtered = apply_filters(&records, &FilterSelection::default().with_contract("ZZ"));
        assert!(filtered.is_empty());
    }
}
