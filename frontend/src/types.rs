//! Common types used across the frontend application.
//!
//! API types mirror the backend's JSON (camelCase) and only carry the
//! fields the page displays.
//!
//! # Categories
//!
//! - **Selection** - current dropdown values
//! - **API Types** - backend response structures
//! - **Log Types** - operator log streaming
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Selection
// =============================================================================

/// Current dropdown values. An empty string means "all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub contract: String,
    pub coordination: String,
    pub work_type: String,
    pub period: String,
}

impl Selection {
    /// Query-string pairs for the set dimensions, using the backend's names.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("contrato", self.contract.as_str()),
            ("coordenacao", self.coordination.as_str()),
            ("tipo", self.work_type.as_str()),
            ("inicio", self.period.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// A period dropdown entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodOption {
    pub key: String,
    pub label: String,
}

/// Response of `GET /api/options`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub contracts: Vec<String>,
    pub coordinations: Vec<String>,
    pub work_types: Vec<String>,
    pub periods: Vec<PeriodOption>,
}

/// The five KPI slots, already formatted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub unique_fronts: String,
    pub edital_length: String,
    pub executive_length: String,
    pub difference: String,
    pub localized_count: String,
}

/// One row of the fronts table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontRow {
    pub contract: String,
    pub coordination: String,
    pub front: String,
    pub work_type: String,
    pub planned_start: String,
    pub status_linear: String,
    pub status_hydromechanical: String,
    pub status_electrical: String,
    pub status_civil: String,
    pub status_energy_entry: String,
    pub economies: String,
    pub scope: String,
}

/// Snapshot metadata shown in the header.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub source: String,
    pub record_count: usize,
    /// RFC 3339, absent before the first successful load
    #[serde(default)]
    pub loaded_at: Option<String>,
}

/// Response of `GET /api/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub snapshot: SnapshotInfo,
    pub total_records: usize,
    pub filtered_records: usize,
    pub kpi_display: KpiDisplay,
    pub rows: Vec<FrontRow>,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level, as sent by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single operator log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl LogEntry {
    /// `HH:MM:SS` in local time, or the raw timestamp if it does not parse.
    pub fn time_of_day(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| self.timestamp.clone())
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Network/HTTP error.
    Network(String),
    /// Backend answered with a non-success status.
    Server { status: u16, body: String },
    /// Response body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server { status, body } => write!(f, "Server error ({}): {}", status, body),
            AppError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
