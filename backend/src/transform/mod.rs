//! Pure dashboard pipeline over decoded records.
//!
//! - Filter: narrow by contract, coordination, work type, period
//! - Aggregate: KPIs of the filtered set
//! - Table: one row per service front
//! - Options: dropdown values from the full set
//! - Dashboard: one render cycle combining the above

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod options;
pub mod table;

pub use aggregate::{compute_kpis, parse_number, KpiDisplay, Kpis};
pub use dashboard::{build_view, DashboardView};
pub use filter::apply_filters;
pub use options::{populate_options, FilterOptions, PeriodOption};
pub use table::{build_table, render_table_html, write_table_csv, FrontRow};
