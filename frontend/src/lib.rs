//! Frentes - Frontend Rust/Leptos Application
//!
//! A WebAssembly page showing service-front KPIs and the per-front table
//! for the dataset held by the backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (snapshot info, reload)                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── FilterBar (4 dropdowns, reset)                          │
//! │  ├── KpiPanel (5 cards)                                      │
//! │  ├── FrontsTable                                             │
//! │  └── LogsPanel                                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every selection change refetches `/api/dashboard`. Filtering, KPIs and
//! the table are computed by the backend, this crate only renders them.
//!
//! # Modules
//!
//! - [`types`] - API types (FilterOptions, DashboardView, LogEntry, ...)
//! - [`components`] - UI components (FilterBar, KpiPanel, FrontsTable, ...)
//! - [`services`] - Backend communication

use leptos::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Selection
    Selection,
    // API
    DashboardView, FilterOptions, FrontRow, KpiDisplay, PeriodOption, SnapshotInfo,
    // Logs
    LogEntry, LogLevel,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

/// Root component, mounted by `main.rs`.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (options, set_options) = create_signal(FilterOptions::default());
    let (selection, set_selection) = create_signal(Selection::default());
    let (dashboard, set_dashboard) = create_signal(DashboardView::default());
    let (revision, set_revision) = create_signal(0u32);
    let (error, set_error) = create_signal(None::<String>);
    let (is_reloading, set_is_reloading) = create_signal(false);
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(set_logs);

    let load_options = move || {
        spawn_local(async move {
            match fetch_options(BACKEND_URL).await {
                Ok(o) => set_options.set(o),
                Err(e) => {
                    log::error!("Failed to load filter options: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };
    load_options();

    // Refetch on every selection change and after each reload
    create_effect(move |_| {
        let current = selection.get();
        let _ = revision.get();
        spawn_local(async move {
            match fetch_dashboard(BACKEND_URL, &current).await {
                // A slower response for an older selection must not win
                Ok(view) if selection.get_untracked() == current => {
                    set_error.set(None);
                    set_dashboard.set(view);
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Failed to load dashboard: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    });

    let on_reload = Callback::new(move |_: ()| {
        set_is_reloading.set(true);
        spawn_local(async move {
            if let Err(e) = reload_dataset(BACKEND_URL).await {
                log::error!("Reload failed: {}", e);
                set_error.set(Some(e.to_string()));
            }
            load_options();
            set_revision.update(|r| *r += 1);
            set_is_reloading.set(false);
        });
    });

    let snapshot = Signal::derive(move || dashboard.with(|d| d.snapshot.clone()));
    let kpis = Signal::derive(move || dashboard.with(|d| d.kpi_display.clone()));
    let rows = Signal::derive(move || dashboard.with(|d| d.rows.clone()));

    view! {
        <Header snapshot=snapshot is_reloading=is_reloading on_reload=on_reload/>

        <div class="container">
            <Show
                when=move || error.get().is_some()
                fallback=|| view! { }
            >
                <div class="error-banner">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <FilterBar options=options selection=selection set_selection=set_selection/>

            <p class="counts">
                {move || dashboard.with(|d| format!("{} de {} registros", d.filtered_records, d.total_records))}
            </p>

            <KpiPanel kpis=kpis/>
            <FrontsTable rows=rows/>
            <LogsPanel logs=logs set_logs=set_logs/>
        </div>

        <Footer/>
    }
}
