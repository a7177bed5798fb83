//! Error types for the dashboard backend.
//!
//! - [`CsvError`] - decoding a CSV text into records
//! - [`PeriodError`] - turning a period key into a label
//! - [`SourceError`] - fetching and loading the data source
//! - [`ServerError`] - HTTP layer
//!
//! Per-record problems (bad numbers, bad dates) are never errors: they
//! degrade to zero and to an empty period respectively.

use thiserror::Error;

// =============================================================================
// CSV Decoding Errors
// =============================================================================

/// Errors while decoding CSV text.
#[derive(Debug, Error)]
pub enum CsvError {
    /// No non-blank line at all, so there is no header row.
    #[error("CSV file is empty")]
    EmptyFile,

    /// The bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {encoding}")]
    Encoding { encoding: String },

    /// Writing an export failed.
    #[error("CSV write error: {0}")]
    Write(#[from] csv::Error),
}

// =============================================================================
// Period Errors
// =============================================================================

/// Errors while formatting a `YYYY-MM` period key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// The key is not of the form `YYYY-MM`.
    #[error("Malformed period key: '{0}'")]
    Malformed(String),

    /// The month is not in `1..=12`.
    #[error("Month out of range in period key '{key}': {month}")]
    MonthOutOfRange { key: String, month: i64 },
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while loading the dataset.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local file could not be read.
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote fetch failed.
    #[error("HTTP fetch of '{url}' failed: {message}")]
    Http { url: String, message: String },

    /// Content was fetched but is not a usable CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Loading the data source failed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The HTML table template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Binding or serving the listener failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for loading operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let source_err: SourceError = csv_err.into();
        assert!(source_err.to_string().contains("empty"));

        let server_err: ServerError = source_err.into();
        assert!(server_err.to_string().contains("Source error"));
    }

    #[test]
    fn test_period_error_format() {
        let err = PeriodError::MonthOutOfRange {
            key: "2026-13".into(),
            month: 13,
        };
        let msg = err.to_string();
        assert!(msg.contains("2026-13"));
        assert!(msg.contains("13"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = SourceError::Io {
            path: "dados.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("dados.csv"));
    }
}
