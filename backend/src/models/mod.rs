//! Domain models shared by the dashboard pipeline.
//!
//! - [`Record`] - one normalized CSV data row
//! - [`fields`] - normalized keys of the columns the dashboard reads
//! - [`WorkType`] - the two work-type tags
//! - [`FrontKey`] - composite `(contract, front)` key of a service front
//! - [`FilterSelection`] - the four dropdown values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Field Keys
// =============================================================================

/// Normalized column keys.
///
/// These are the outputs of [`crate::parser::normalize_header`] for the
/// headers of the source spreadsheet.
pub mod fields {
    pub const CONTRACT: &str = "contrato";
    pub const COORDINATION: &str = "coordenacao";
    pub const FRONT: &str = "frentedeservico";
    pub const WORK_TYPE: &str = "tipodeobra";
    pub const PLANNED_START: &str = "previsaodeinicio";
    pub const STATUS_LINEAR: &str = "statusprojetoexecutivolinear";
    pub const STATUS_HYDROMECHANICAL: &str = "statusprojetoexecutivohidromecanico";
    pub const STATUS_ELECTRICAL: &str = "statusprojetoexecutivoeletrica";
    pub const STATUS_CIVIL: &str = "statusprojetoexecutivocivil";
    pub const STATUS_ENERGY_ENTRY: &str = "statusentradadeenergia";
    pub const ECONOMIES: &str = "economiascontempladas";
    pub const SCOPE: &str = "escopo";
    pub const EDITAL_LENGTH: &str = "extensaoeditalm";
    pub const EXECUTIVE_LENGTH: &str = "extensaoexecutivom";
}

// =============================================================================
// Record
// =============================================================================

/// One decoded CSV data row: normalized field key -> trimmed value.
///
/// Absent keys read as the empty string. A record has no mutating API;
/// it is built once through [`FromIterator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Value of `key`, or `""` if the column is missing.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contract(&self) -> &str {
        self.get(fields::CONTRACT)
    }

    pub fn coordination(&self) -> &str {
        self.get(fields::COORDINATION)
    }

    pub fn front(&self) -> &str {
        self.get(fields::FRONT)
    }

    pub fn work_type(&self) -> &str {
        self.get(fields::WORK_TYPE)
    }

    pub fn planned_start(&self) -> &str {
        self.get(fields::PLANNED_START)
    }

    /// Composite key identifying the service front of this row.
    pub fn front_key(&self) -> FrontKey<'_> {
        (self.contract(), self.front())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    /// Later pairs with the same key replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// `(contract, front name)`.
///
/// Kept as a tuple so two different splits can never collide the way a
/// joined string could.
pub type FrontKey<'a> = (&'a str, &'a str);

// =============================================================================
// Work Type
// =============================================================================

/// Work-type tag found in the `tipodeobra` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    Linear,
    Localizada,
}

impl WorkType {
    pub const ALL: [WorkType; 2] = [WorkType::Linear, WorkType::Localizada];

    /// Exact string stored in the CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Linear => "Linear",
            WorkType::Localizada => "Localizada",
        }
    }

    /// Case-sensitive match against a raw column value.
    pub fn matches(&self, value: &str) -> bool {
        self.as_str() == value
    }
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Filter Selection
// =============================================================================

/// Current dropdown values.
///
/// `None` and `Some("")` both mean "no constraint on this dimension"; the
/// query-string names match the dashboard's form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default, rename = "contrato", skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,

    #[serde(default, rename = "coordenacao", skip_serializing_if = "Option::is_none")]
    pub coordination: Option<String>,

    #[serde(default, rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,

    /// Period key `YYYY-MM`.
    #[serde(default, rename = "inicio", skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterSelection {
    pub fn contract(&self) -> Option<&str> {
        active(&self.contract)
    }

    pub fn coordination(&self) -> Option<&str> {
        active(&self.coordination)
    }

    pub fn work_type(&self) -> Option<&str> {
        active(&self.work_type)
    }

    pub fn period(&self) -> Option<&str> {
        active(&self.period)
    }

    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.contract().is_none()
            && self.coordination().is_none()
            && self.work_type().is_none()
            && self.period().is_none()
    }

    pub fn with_contract(mut self, value: impl Into<String>) -> Self {
        self.contract = Some(value.into());
        self
    }

    pub fn with_coordination(mut self, value: impl Into<String>) -> Self {
        self.coordination = Some(value.into());
        self
    }

    pub fn with_work_type(mut self, value: impl Into<String>) -> Self {
        self.work_type = Some(value.into());
        self
    }

    pub fn with_period(mut self, value: impl Into<String>) -> Self {
        self.period = Some(value.into());
        self
    }
}
