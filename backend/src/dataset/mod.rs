//! Dataset snapshots and where they come from.
//!
//! The dashboard always works on the full, unfiltered record set of one
//! immutable [`Dataset`]. [`DashboardState`] hands out `Arc` snapshots; a
//! reload builds a fresh dataset and swaps it in wholesale, so readers that
//! already hold the previous snapshot keep a consistent view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::api::logs::{log_error, log_info, log_success, log_warning};
use crate::error::{SourceError, SourceResult};
use crate::models::Record;
use crate::parser::{parse_bytes, ParsedCsv};

/// Default data file, resolved against the working directory.
pub const DEFAULT_DATA_FILE: &str = "dados.csv";

// =============================================================================
// Data Source
// =============================================================================

/// Location of the CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local file path
    File(PathBuf),
    /// `http://` or `https://` URL
    Url(String),
}

impl DataSource {
    /// Interpret a CLI/env value: URLs by scheme, anything else as a path.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DataSource::Url(value.to_string())
        } else {
            DataSource::File(PathBuf::from(value))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::File(PathBuf::from(DEFAULT_DATA_FILE))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Read the raw bytes of a source.
pub async fn fetch_bytes(source: &DataSource) -> SourceResult<Vec<u8>> {
    match source {
        DataSource::File(path) => tokio::fs::read(path).await.map_err(|e| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        }),
        DataSource::Url(url) => {
            let http_err = |e: reqwest::Error| SourceError::Http {
                url: url.clone(),
                message: e.to_string(),
            };
            let response = reqwest::get(url)
                .await
                .and_then(|r| r.error_for_status())
                .map_err(http_err)?;
            let bytes = response.bytes().await.map_err(http_err)?;
            Ok(bytes.to_vec())
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Metadata of a loaded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    /// Changes on every successful load
    pub id: Uuid,
    pub source: String,
    pub encoding: String,
    /// Normalized header keys
    pub headers: Vec<String>,
    pub record_count: usize,
    /// `None` for the empty placeholder snapshot
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Full record set plus load metadata. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub info: SnapshotInfo,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Placeholder used before the first successful load.
    pub fn empty(source: &DataSource) -> Self {
        Self {
            info: SnapshotInfo {
                id: Uuid::nil(),
                source: source.to_string(),
                encoding: String::new(),
                headers: Vec::new(),
                record_count: 0,
                loaded_at: None,
            },
            records: Vec::new(),
        }
    }

    pub fn from_parsed(parsed: ParsedCsv, source: &DataSource) -> Self {
        Self {
            info: SnapshotInfo {
                id: Uuid::new_v4(),
                source: source.to_string(),
                encoding: parsed.encoding,
                headers: parsed.headers,
                record_count: parsed.records.len(),
                loaded_at: Some(Utc::now()),
            },
            records: parsed.records,
        }
    }

    /// True for the placeholder and for files with no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fetch and decode a source into a new dataset.
pub async fn load_dataset(source: &DataSource) -> SourceResult<Dataset> {
    log_info(format!("📖 Loading {source}..."));
    let bytes = fetch_bytes(source).await?;
    let parsed = parse_bytes(&bytes)?;

    log_success(format!("Detected encoding: {}", parsed.encoding));
    log_success(format!(
        "Read {} rows, {} columns",
        parsed.records.len(),
        parsed.headers.len()
    ));

    Ok(Dataset::from_parsed(parsed, source))
}

// =============================================================================
// Dashboard State
// =============================================================================

/// Owner of the current snapshot.
pub struct DashboardState {
    source: DataSource,
    current: RwLock<Arc<Dataset>>,
}

impl DashboardState {
    /// Start on an empty snapshot; call [`DashboardState::reload`] to load.
    pub fn new(source: DataSource) -> Self {
        let empty = Arc::new(Dataset::empty(&source));
        Self {
            source,
            current: RwLock::new(empty),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// The snapshot to use for one render cycle.
    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.current.read().await.clone()
    }

    /// Load the source again and replace the current snapshot.
    ///
    /// On failure the error is logged and the previous snapshot stays.
    pub async fn reload(&self) -> SourceResult<Arc<Dataset>> {
        let dataset = match load_dataset(&self.source).await {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                log_error(format!("Failed to load {}: {}", self.source, e));
                return Err(e);
            }
        };

        *self.current.write().await = dataset.clone();
        log_success(format!(
            "Snapshot {} active ({} records)",
            dataset.info.id, dataset.info.record_count
        ));
        Ok(dataset)
    }

    /// Startup load. A failure leaves the dashboard empty; there is no retry.
    pub async fn initial_load(&self) {
        if self.reload().await.is_err() {
            log_warning("Dashboard will start with an empty dataset");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "Contrato;Frente de Servico;Tipo de Obra\nC1;F1;Linear\nC1;F2;Localizada\n";

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.org/dados.csv"),
            DataSource::Url("https://example.org/dados.csv".into())
        );
        assert_eq!(
            DataSource::parse("data/dados.csv"),
            DataSource::File(PathBuf::from("data/dados.csv"))
        );
        assert_eq!(DataSource::default().to_string(), "dados.csv");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dados.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let dataset = load_dataset(&DataSource::File(path)).await.unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.info.record_count, 2);
        assert_eq!(dataset.info.headers, vec!["contrato", "frentedeservico", "tipodeobra"]);
        assert!(dataset.info.loaded_at.is_some());
        assert!(!dataset.info.id.is_nil());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let source = DataSource::File(dir.path().join("nope.csv"));

        let err = load_dataset(&source).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn test_failed_initial_load_keeps_empty_snapshot() {
        let dir = tempdir().unwrap();
        let state = DashboardState::new(DataSource::File(dir.path().join("nope.csv")));

        state.initial_load().await;

        let snapshot = state.snapshot().await;
        assert!(snapshot.is_empty());
        assert!(snapshot.info.id.is_nil());
    }

    #[tokio::test]
    async fn test_reload_swaps_snapshot_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dados.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let state = DashboardState::new(DataSource::File(path.clone()));

        state.reload().await.unwrap();
        let first = state.snapshot().await;

        std::fs::write(&path, "Contrato;Frente de Servico\nC9;F9\n").unwrap();
        state.reload().await.unwrap();
        let second = state.snapshot().await;

        assert_ne!(first.info.id, second.info.id);
        assert_eq!(first.records.len(), 2);
        assert_eq!(second.records.len(), 1);
        assert_eq!(second.records[0].contract(), "C9");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dados.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let state = DashboardState::new(DataSource::File(path.clone()));
        state.reload().await.unwrap();

        std::fs::write(&path, "\n\n").unwrap();
        assert!(state.reload().await.is_err());
        assert_eq!(state.snapshot().await.records.len(), 2);
    }
}
