use leptos::*;

use crate::{SnapshotInfo, APP_NAME};

/// Page header: title, active snapshot, reload action.
#[component]
pub fn Header(
    snapshot: Signal<SnapshotInfo>,
    is_reloading: ReadSignal<bool>,
    on_reload: Callback<()>,
) -> impl IntoView {
    let status = move || {
        let info = snapshot.get();
        match info.loaded_at {
            Some(_) => format!("{} • {} registros", info.source, info.record_count),
            None => "Sem dados carregados".to_string(),
        }
    };

    view! {
        <header>
            <div class="header-left">
                <span class="logo">{APP_NAME}</span>
                <span class="badge">{status}</span>
            </div>
            <div class="header-right">
                <button
                    class="btn btn-secondary"
                    id="recarregar"
                    disabled=move || is_reloading.get()
                    on:click=move |_| on_reload.call(())
                >
                    {move || if is_reloading.get() { "Recarregando..." } else { "Recarregar dados" }}
                </button>
            </div>
        </header>
    }
}
