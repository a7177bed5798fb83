//! KPI cards: fronts, edital and executive lengths, their difference and
//! the localized-work count.

use leptos::*;

use crate::KpiDisplay;

#[component]
fn KpiCard(
    label: &'static str,
    id: &'static str,
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <span class="kpi-label">{label}</span>
            <span class="kpi-value" id=id>{move || value.get()}</span>
        </div>
    }
}

/// The five KPI cards. Values arrive pre-formatted from the backend.
#[component]
pub fn KpiPanel(kpis: Signal<KpiDisplay>) -> impl IntoView {
    view! {
        <section class="kpis">
            <KpiCard
                label="Frentes"
                id="kpiFrentes"
                value=Signal::derive(move || kpis.with(|k| k.unique_fronts.clone()))
            />
            <KpiCard
                label="Extensão edital (m)"
                id="kpiEdital"
                value=Signal::derive(move || kpis.with(|k| k.edital_length.clone()))
            />
            <KpiCard
                label="Extensão executivo (m)"
                id="kpiExecutivo"
                value=Signal::derive(move || kpis.with(|k| k.executive_length.clone()))
            />
            <KpiCard
                label="Diferença (m)"
                id="kpiDiferenca"
                value=Signal::derive(move || kpis.with(|k| k.difference.clone()))
            />
            <KpiCard
                label="Obras localizadas"
                id="kpiLocalizadas"
                value=Signal::derive(move || kpis.with(|k| k.localized_count.clone()))
            />
        </section>
    }
}
