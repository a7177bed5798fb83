//! Values offered by the dashboard's dropdowns.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::models::{Record, WorkType};
use crate::period::{extract_period, period_label_or_key};

/// A period dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOption {
    /// `YYYY-MM`, the value sent back as the `inicio` filter
    pub key: String,
    /// e.g. `Julho/2026`
    pub label: String,
}

/// Choices for every filter control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct non-empty contracts, first-seen order
    pub contracts: Vec<String>,
    /// Distinct non-empty coordinations, first-seen order
    pub coordinations: Vec<String>,
    /// Work-type tags, fixed
    pub work_types: Vec<String>,
    /// Distinct non-empty periods, ascending
    pub periods: Vec<PeriodOption>,
}

/// Derive dropdown choices from the full dataset.
pub fn populate_options(records: &[Record]) -> FilterOptions {
    let mut contracts = FirstSeen::default();
    let mut coordinations = FirstSeen::default();
    // `YYYY-MM` sorts chronologically as a string
    let mut periods = BTreeSet::new();

    for record in records {
        contracts.push(record.contract());
        coordinations.push(record.coordination());

        let period = extract_period(record.planned_start());
        if !period.is_empty() {
            periods.insert(period);
        }
    }

    FilterOptions {
        contracts: contracts.values,
        coordinations: coordinations.values,
        work_types: WorkType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
        periods: periods
            .into_iter()
            .map(|key| PeriodOption {
                label: period_label_or_key(&key),
                key,
            })
            .collect(),
    }
}

/// Distinct non-empty strings in insertion order.
#[derive(Default)]
struct FirstSeen {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl FirstSeen {
    fn push(&mut self, value: &str) {
        if !value.is_empty() && self.seen.insert(value.to_string()) {
            self.values.push(value.to_string());
        }
    }
}
