//! REST API types for frontend integration.
//!
//! The dashboard view, filter options and front rows are serialized as-is
//! (see [`crate::transform`]); this module holds the envelope types that
//! only exist at the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::SnapshotInfo;
use crate::error::ServerError;

/// Response of `POST /api/reload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    /// "ready" when the file has data rows, "empty" otherwise
    pub status: String,
    pub snapshot: SnapshotInfo,
}

impl From<&SnapshotInfo> for ReloadResponse {
    fn from(info: &SnapshotInfo) -> Self {
        Self {
            status: if info.record_count > 0 { "ready" } else { "empty" }.to_string(),
            snapshot: info.clone(),
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // The upstream file or URL is what failed
            ServerError::Source(_) => StatusCode::BAD_GATEWAY,
            ServerError::Render(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(error_response(&self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DataSource, Dataset};
    use crate::error::{CsvError, SourceError};

    #[test]
    fn test_reload_response_of_empty_snapshot() {
        let dataset = Dataset::empty(&DataSource::default());
        let response = ReloadResponse::from(&dataset.info);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "empty");
        assert_eq!(json["snapshot"]["recordCount"], 0);
        assert_eq!(json["snapshot"]["source"], "dados.csv");
        assert!(json["snapshot"]["loadedAt"].is_null());
    }

    #[test]
    fn test_source_error_maps_to_bad_gateway() {
        let err = ServerError::from(SourceError::Csv(CsvError::EmptyFile));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_response() {
        let body = error_response("boom");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "boom");
    }
}
