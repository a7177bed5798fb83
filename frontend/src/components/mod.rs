//! UI Components of the dashboard.
//!
//! # Layout Components
//! - [`Header`] - Title, active snapshot and reload button
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`FilterBar`] - The four dropdowns and the reset button
//! - [`KpiPanel`] - The five KPI cards
//! - [`FrontsTable`] - One row per service front
//! - [`LogsPanel`] - Operator logs from the backend (SSE)

mod filters;
mod footer;
mod fronts_table;
mod header;
mod kpis;
mod logs;

pub use filters::*;
pub use footer::*;
pub use fronts_table::*;
pub use header::*;
pub use kpis::*;
pub use logs::*;
