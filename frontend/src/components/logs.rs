//! Operator log stream using Server-Sent Events (SSE).
//!
//! Connects to the backend's `/api/logs` endpoint. The backend replays its
//! recent history on connect, so a dataset that failed to load at startup
//! is still explained here.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::{LogEntry, BACKEND_URL, MAX_LOG_ENTRIES};

fn request_animation_frame(f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    let Some(window) = web_sys::window() else {
        return;
    };
    if window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .is_ok()
    {
        closure.forget();
    }
}

fn parse_sse_log(json: &str) -> Option<LogEntry> {
    serde_json::from_str(json).ok()
}

/// Start the SSE connection. Called once at app startup.
pub fn init_sse_logs(set_logs: WriteSignal<Vec<LogEntry>>) {
    let sse_url = format!("{}/api/logs", BACKEND_URL);

    let event_source = match EventSource::new(&sse_url) {
        Ok(es) => es,
        Err(e) => {
            log::error!("Failed to create EventSource: {:?}", e);
            return;
        }
    };

    let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
        let Some(data) = event.data().as_string() else {
            return;
        };
        match parse_sse_log(&data) {
            Some(entry) => set_logs.update(|logs| {
                logs.push(entry);
                if logs.len() > MAX_LOG_ENTRIES {
                    logs.remove(0);
                }
            }),
            None => log::warn!("Ignoring malformed log event: {}", data),
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    event_source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
        log::warn!("SSE connection error - will auto-reconnect");
    }) as Box<dyn FnMut(web_sys::Event)>);

    event_source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    // Lives for the whole page
    std::mem::forget(event_source);

    log::info!("📡 SSE log stream initialized");
}

/// Collapsible operator log panel.
#[component]
pub fn LogsPanel(
    logs: ReadSignal<Vec<LogEntry>>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let (expanded, set_expanded) = create_signal(false);
    let logs_container = create_node_ref::<leptos::html::Div>();

    create_effect(move |_| {
        let _ = logs.get();
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <button
                    class="logs-title"
                    on:click=move |_| set_expanded.update(|open| *open = !*open)
                >
                    {move || format!("📋 Registros ({})", logs.with(|l| l.len()))}
                </button>
                <button class="logs-clear" on:click=move |_| set_logs.set(vec![])>
                    "Limpar"
                </button>
            </div>
            <div
                class="logs-content"
                class:hidden=move || !expanded.get()
                node_ref=logs_container
            >
                <For
                    each=move || logs.get().into_iter().enumerate()
                    key=|(i, entry)| (*i, entry.timestamp.clone())
                    children=move |(_, entry)| {
                        view! {
                            <div class=format!("log-entry {}", entry.level.css_class())>
                                <span class="log-time">"[" {entry.time_of_day()} "] "</span>
                                {entry.message.clone()}
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    #[test]
    fn test_parse_backend_event() {
        let entry = parse_sse_log(
            r#"{"level":"error","message":"Failed to load dados.csv","timestamp":"2026-07-05T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "Failed to load dados.csv");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_sse_log("not json").is_none());
        assert!(parse_sse_log(r#"{"level":"loud","message":"x","timestamp":""}"#).is_none());
    }
}
