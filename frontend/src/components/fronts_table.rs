//! Per-front table, one row per (contract, front).

use leptos::*;

use crate::FrontRow;

/// Same headings as the backend's HTML and CSV exports.
const HEADINGS: [&str; 12] = [
    "Contrato",
    "Coordenação",
    "Frente",
    "Tipo",
    "Previsão de Início",
    "Status Linear",
    "Status Hidromecânico",
    "Status Elétrica",
    "Status Civil",
    "Entrada de Energia",
    "Economias",
    "Escopo",
];

fn cells(row: &FrontRow) -> [String; 12] {
    [
        row.contract.clone(),
        row.coordination.clone(),
        row.front.clone(),
        row.work_type.clone(),
        row.planned_start.clone(),
        row.status_linear.clone(),
        row.status_hydromechanical.clone(),
        row.status_electrical.clone(),
        row.status_civil.clone(),
        row.status_energy_entry.clone(),
        row.economies.clone(),
        row.scope.clone(),
    ]
}

#[component]
pub fn FrontsTable(rows: Signal<Vec<FrontRow>>) -> impl IntoView {
    view! {
        <section class="table-section">
            <table id="tabelaFrentes">
                <thead>
                    <tr>
                        {HEADINGS.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|row| (row.contract.clone(), row.front.clone())
                        children=move |row| {
                            view! {
                                <tr>
                                    {cells(&row).into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || rows.with(|r| r.is_empty()) fallback=|| view! {}>
                <p class="empty">"Nenhuma frente encontrada para os filtros selecionados."</p>
            </Show>
        </section>
    }
}
