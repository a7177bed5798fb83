//! Backend communication.
//!
//! - [`dashboard`] - options, dashboard view and reload requests

pub mod dashboard;

pub use dashboard::*;
