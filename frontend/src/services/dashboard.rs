//! HTTP calls to the dashboard backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::types::{AppError, AppResult, DashboardView, FilterOptions, Selection};

/// `?k=v&...` with URI-encoded values, or `""` when nothing is selected.
fn query_string(selection: &Selection) -> String {
    let pairs: Vec<String> = selection
        .query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, String::from(js_sys::encode_uri_component(value))))
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    if !response.ok() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Server {
            status: response.status(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Dropdown values for the current snapshot.
pub async fn fetch_options(backend_url: &str) -> AppResult<FilterOptions> {
    let url = format!("{}/api/options", backend_url);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    read_json(response).await
}

/// KPIs and fronts for `selection`.
pub async fn fetch_dashboard(backend_url: &str, selection: &Selection) -> AppResult<DashboardView> {
    let url = format!("{}/api/dashboard{}", backend_url, query_string(selection));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    read_json(response).await
}

/// Ask the backend to reload its CSV. The new snapshot is picked up by the
/// next options/dashboard fetch.
pub async fn reload_dataset(backend_url: &str) -> AppResult<serde_json::Value> {
    let url = format!("{}/api/reload", backend_url);
    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;
    read_json(response).await
}
