//! # Frentes - service-front dashboard backend
//!
//! Loads a `;`-delimited CSV of service fronts, normalizes its headers and
//! serves filtered KPIs and a per-front table to the browser dashboard.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  dados.csv  │────▶│   Parser    │────▶│  Snapshot   │────▶│  Dashboard  │
//! │ (file/URL)  │     │ (headers)   │     │  (Arc)      │     │ KPIs+table  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use frentes::{build_view, decode_csv, FilterSelection};
//! use frentes::dataset::{DataSource, Dataset};
//! use frentes::parser::parse_bytes;
//!
//! let csv = "Contrato;Frente de Servico;Tipo de Obra;Extensao Edital (m)\nA;F1;Linear;10\n";
//! assert_eq!(decode_csv(csv).unwrap().len(), 1);
//!
//! let dataset = Dataset::from_parsed(parse_bytes(csv.as_bytes()).unwrap(), &DataSource::default());
//! let view = build_view(&dataset, &FilterSelection::default());
//! assert_eq!(view.kpi_display.edital_length, "10.00");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Record, field keys, filter selection
//! - [`parser`] - Header normalization and CSV decoding
//! - [`period`] - Dates to `YYYY-MM` periods and labels
//! - [`transform`] - Filter, KPIs, front table, dropdown options
//! - [`dataset`] - Data source and snapshot ownership
//! - [`config`] - Server configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;
pub mod period;

// Dashboard pipeline
pub mod transform;

// Loading
pub mod dataset;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PeriodError, ServerError, SourceError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{fields, FilterSelection, FrontKey, Record, WorkType};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_csv, normalize_header, parse_bytes, ParsedCsv};
pub use period::{extract_period, format_period_label};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    apply_filters, build_table, build_view, compute_kpis, populate_options, render_table_html,
    write_table_csv, DashboardView, FilterOptions, FrontRow, KpiDisplay, Kpis, PeriodOption,
};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use dataset::{load_dataset, DashboardState, DataSource, Dataset, SnapshotInfo};
pub use config::ServerConfig;

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
