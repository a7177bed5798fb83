//! HTTP server for the dashboard.
//!
//! Every request takes its own `Arc` snapshot of the dataset, so a reload
//! in flight never changes the data under a running computation.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check + active snapshot       |
//! | GET    | `/api/options`    | Dropdown values                      |
//! | GET    | `/api/dashboard`  | KPIs and front rows for a selection  |
//! | GET    | `/api/table`      | Front table as HTML markup           |
//! | POST   | `/api/reload`     | Reload the CSV and swap the snapshot |
//! | GET    | `/api/logs`       | SSE stream of operator logs          |
//! | GET    | `/*`              | Built frontend (static files)        |

use axum::{
    extract::{Query, State},
    http::{header, Method},
    response::{sse::Event, Html, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::logs::{LogEntry, LOG_BROADCASTER};
use super::types::ReloadResponse;
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::dataset::DashboardState;
use crate::models::FilterSelection;
use crate::transform::{
    apply_filters, build_table, build_view, populate_options, render_table_html, DashboardView,
    FilterOptions,
};

type SharedState = Arc<DashboardState>;

/// Build the router over an already-created state.
pub fn router(state: SharedState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/api/options", get(options))
        .route("/api/dashboard", get(dashboard))
        .route("/api/table", get(table))
        .route("/api/reload", post(reload))
        .route("/api/logs", get(sse_logs))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .with_state(state)
}

/// Load the dataset once, then serve until the process stops.
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let state = Arc::new(DashboardState::new(config.data_source.clone()));
    state.initial_load().await;

    let app = router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    println!("🚀 Dashboard server running on http://localhost:{}", config.port);
    println!("   GET  /api/options   - Filter options");
    println!("   GET  /api/dashboard - KPIs and fronts");
    println!("   GET  /api/table     - Fronts as HTML");
    println!("   POST /api/reload    - Reload {}", config.data_source);
    println!("   GET  /api/logs      - SSE log stream");
    println!("   GET  /              - {}", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health(State(state): State<SharedState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    Json(json!({
        "status": "ok",
        "service": "frentes",
        "version": env!("CARGO_PKG_VERSION"),
        "snapshot": snapshot.info,
    }))
}

async fn options(State(state): State<SharedState>) -> Json<FilterOptions> {
    let snapshot = state.snapshot().await;
    Json(populate_options(&snapshot.records))
}

async fn dashboard(
    State(state): State<SharedState>,
    Query(selection): Query<FilterSelection>,
) -> Json<DashboardView> {
    let snapshot = state.snapshot().await;
    Json(build_view(&snapshot, &selection))
}

async fn table(
    State(state): State<SharedState>,
    Query(selection): Query<FilterSelection>,
) -> ServerResult<Html<String>> {
    let snapshot = state.snapshot().await;
    let filtered = apply_filters(&snapshot.records, &selection);
    Ok(Html(render_table_html(&build_table(filtered))?))
}

async fn reload(State(state): State<SharedState>) -> ServerResult<Json<ReloadResponse>> {
    let dataset = state.reload().await?;
    Ok(Json(ReloadResponse::from(&dataset.info)))
}

fn to_event(entry: &LogEntry) -> Option<Event> {
    let json = serde_json::to_string(entry).ok()?;
    Some(Event::default().data(json))
}

/// Replays recent history, then follows live entries.
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();
    let history = LOG_BROADCASTER.recent();

    let replay = tokio_stream::iter(history)
        .filter_map(|entry| to_event(&entry).map(Ok::<Event, Infallible>));
    let live = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => to_event(&entry).map(Ok::<Event, Infallible>),
        Err(_) => None,
    });

    Sse::new(replay.chain(live)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSource;
    use tempfile::tempdir;

    const CSV: &str = "\
Contrato;Coordenacao;Frente de Servico;Tipo de Obra;Previsao de Inicio;Extensao Edital (m);Extensao Executivo (m)
A;Norte;F1;Linear;05/07/2026;10;12
A;Norte;F1;Linear;05/07/2026;5;5
B;Sul;F<2>;Localizada;2026-08-10;;
";

    async fn loaded_state() -> (tempfile::TempDir, SharedState) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dados.csv");
        std::fs::write(&path, CSV).unwrap();
        let state = Arc::new(DashboardState::new(DataSource::File(path)));
        state.reload().await.unwrap();
        (dir, state)
    }

    #[tokio::test]
    async fn test_options_endpoint() {
        let (_dir, state) = loaded_state().await;
        let Json(opts) = options(State(state)).await;

        assert_eq!(opts.contracts, vec!["A", "B"]);
        assert_eq!(opts.coordinations, vec!["Norte", "Sul"]);
        assert_eq!(opts.periods.len(), 2);
        assert_eq!(opts.periods[0].label, "Julho/2026");
    }

    #[tokio::test]
    async fn test_dashboard_endpoint_filters() {
        let (_dir, state) = loaded_state().await;
        let selection = FilterSelection::default().with_contract("A");
        let Json(view) = dashboard(State(state), Query(selection)).await;

        assert_eq!(view.filtered_records, 2);
        assert_eq!(view.kpi_display.unique_fronts, "1");
        assert_eq!(view.kpi_display.edital_length, "15.00");
        assert_eq!(view.kpi_display.executive_length, "17.00");
        assert_eq!(view.kpi_display.difference, "2.00");
        assert_eq!(view.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_table_endpoint_escapes() {
        let (_dir, state) = loaded_state().await;
        let Html(markup) = table(State(state), Query(FilterSelection::default()))
            .await
            .unwrap();

        assert!(markup.contains("<td>F&lt;2&gt;</td>"));
        assert_eq!(markup.matches("<tr><td>").count(), 2);
    }

    #[tokio::test]
    async fn test_reload_failure_is_bad_gateway() {
        let dir = tempdir().unwrap();
        let state = Arc::new(DashboardState::new(DataSource::File(dir.path().join("x.csv"))));

        let err = reload(State(state.clone())).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("x.csv"));

        let Json(view) = dashboard(State(state), Query(FilterSelection::default())).await;
        assert_eq!(view.total_records, 0);
        assert_eq!(view.kpi_display.edital_length, "0.00");
    }
}
