//! KPI aggregation over a (filtered) record set.
//!
//! Front counting and length sums are independent: two rows of the same
//! front count once as a front but both contribute to the sums.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{fields, Record, WorkType};

/// Aggregated indicators of a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// Distinct `(contract, front)` pairs
    pub unique_fronts: usize,
    /// Sum of edital lengths over `Linear` rows, in meters
    pub edital_length: f64,
    /// Sum of executive-project lengths over `Linear` rows, in meters
    pub executive_length: f64,
    /// `executive_length - edital_length`
    pub difference: f64,
    /// Number of `Localizada` rows
    pub localized_count: usize,
}

/// The five KPI slots as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub unique_fronts: String,
    pub edital_length: String,
    pub executive_length: String,
    pub difference: String,
    pub localized_count: String,
}

impl Kpis {
    /// Counts as integers, lengths with exactly two decimals.
    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            unique_fronts: self.unique_fronts.to_string(),
            edital_length: fixed2(self.edital_length),
            executive_length: fixed2(self.executive_length),
            difference: fixed2(self.difference),
            localized_count: self.localized_count.to_string(),
        }
    }
}

/// Largest magnitude for which whole cents fit exactly in an `f64`.
const MAX_EXACT_CENTS: f64 = 1e13;

/// Two-decimal rendering, rounding exact half-cent ties away from zero.
///
/// `{:.2}` rounds ties to even, so `380.125` would print as `380.12`. The
/// only `f64` values sitting exactly on a half cent are odd multiples of
/// `1/8` (`.125`, `.375`, `.625`, `.875`); those are rounded up by hand.
/// `-0.0` and values that round to zero print as `0.00`.
pub fn fixed2(value: f64) -> String {
    let magnitude = value.abs();
    let eighths = magnitude * 8.0;
    if magnitude < MAX_EXACT_CENTS && eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (magnitude * 100.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}.{:02}", cents / 100, cents % 100);
    }

    let text = format!("{value:.2}");
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Locale-free number parsing.
///
/// Empty, non-numeric, NaN and infinite values all count as zero.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Compute the KPIs of `records` in a single pass.
pub fn compute_kpis<'a, I>(records: I) -> Kpis
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut fronts = HashSet::new();
    let mut kpis = Kpis::default();

    for record in records {
        fronts.insert(record.front_key());

        let work_type = record.work_type();
        if WorkType::Linear.matches(work_type) {
            kpis.edital_length += parse_number(record.get(fields::EDITAL_LENGTH));
            kpis.executive_length += parse_number(record.get(fields::EXECUTIVE_LENGTH));
        } else if WorkType::Localizada.matches(work_type) {
            kpis.localized_count += 1;
        }
    }

    kpis.unique_fronts = fronts.len();
    kpis.difference = kpis.executive_length - kpis.edital_length;
    kpis
}
