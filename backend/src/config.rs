//! Server configuration.
//!
//! Defaults, overridden by environment variables (a `.env` file is read by
//! the binary through `dotenvy`), overridden by CLI flags.

use std::path::PathBuf;

use crate::dataset::DataSource;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default directory of the built frontend.
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";

pub const ENV_PORT: &str = "FRENTES_PORT";
pub const ENV_DATA: &str = "FRENTES_DATA";
pub const ENV_STATIC_DIR: &str = "FRENTES_STATIC_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_source: DataSource,
    /// Served as static files under `/`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_source: DataSource::default(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`. Unparseable ports are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup(ENV_PORT).and_then(|p| p.trim().parse().ok()) {
            config.port = port;
        }
        if let Some(data) = lookup(ENV_DATA).filter(|d| !d.trim().is_empty()) {
            config.data_source = DataSource::parse(data.trim());
        }
        if let Some(dir) = lookup(ENV_STATIC_DIR).filter(|d| !d.trim().is_empty()) {
            config.static_dir = PathBuf::from(dir.trim());
        }

        config
    }

    /// Apply CLI flags on top.
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        data: Option<&str>,
        static_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(data) = data {
            self.data_source = DataSource::parse(data);
        }
        if let Some(dir) = static_dir {
            self.static_dir = dir;
        }
        self
    }
}
