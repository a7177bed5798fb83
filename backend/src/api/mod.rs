//! HTTP API module.
//!
//! The HTTP server, its envelope types and the operator log channel.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server};
pub use types::*;
