//! Application configuration.
//!
//! Compile-time settings of the dashboard page.

/// Backend API base URL.
///
/// The backend also serves the built page, so same-origin requests work too.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Application name shown in the header.
pub const APP_NAME: &str = "Painel de Frentes de Serviço";

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;
