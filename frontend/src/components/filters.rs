//! Filter bar: contract, coordination, work type and planned-start period.
//!
//! An empty value means "all". Every change is written to the shared
//! [`Selection`] signal, which drives the dashboard refetch.

use leptos::*;

use crate::{FilterOptions, Selection};

/// `(value, label)` pairs offered by one dropdown.
type Choices = Vec<(String, String)>;

fn same_label(values: &[String]) -> Choices {
    values.iter().map(|v| (v.clone(), v.clone())).collect()
}

#[component]
fn FilterSelect(
    label: &'static str,
    id: &'static str,
    choices: Signal<Choices>,
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter">
            <span class="filter-label">{label}</span>
            <select
                id=id
                prop:value=move || value.get()
                on:change=move |ev| on_change.call(event_target_value(&ev))
            >
                <option value="">"Todos"</option>
                <For
                    each=move || choices.get()
                    key=|(value, _)| value.clone()
                    children=move |(value, text)| {
                        view! { <option value=value>{text}</option> }
                    }
                />
            </select>
        </label>
    }
}

#[component]
pub fn FilterBar(
    options: ReadSignal<FilterOptions>,
    selection: ReadSignal<Selection>,
    set_selection: WriteSignal<Selection>,
) -> impl IntoView {
    let contracts = Signal::derive(move || options.with(|o| same_label(&o.contracts)));
    let coordinations = Signal::derive(move || options.with(|o| same_label(&o.coordinations)));
    let work_types = Signal::derive(move || options.with(|o| same_label(&o.work_types)));
    let periods = Signal::derive(move || {
        options.with(|o| {
            o.periods
                .iter()
                .map(|p| (p.key.clone(), p.label.clone()))
                .collect()
        })
    });

    view! {
        <section class="filters">
            <FilterSelect
                label="Contrato"
                id="filtroContrato"
                choices=contracts
                value=Signal::derive(move || selection.with(|s| s.contract.clone()))
                on_change=Callback::new(move |v: String| set_selection.update(|s| s.contract = v))
            />
            <FilterSelect
                label="Coordenação"
                id="filtroCoordenacao"
                choices=coordinations
                value=Signal::derive(move || selection.with(|s| s.coordination.clone()))
                on_change=Callback::new(move |v: String| set_selection.update(|s| s.coordination = v))
            />
            <FilterSelect
                label="Tipo de obra"
                id="filtroTipo"
                choices=work_types
                value=Signal::derive(move || selection.with(|s| s.work_type.clone()))
                on_change=Callback::new(move |v: String| set_selection.update(|s| s.work_type = v))
            />
            <FilterSelect
                label="Previsão de início"
                id="filtroInicio"
                choices=periods
                value=Signal::derive(move || selection.with(|s| s.period.clone()))
                on_change=Callback::new(move |v: String| set_selection.update(|s| s.period = v))
            />
            <button
                class="btn btn-secondary"
                id="limparFiltros"
                on:click=move |_| set_selection.set(Selection::default())
            >
                "Limpar filtros"
            </button>
        </section>
    }
}
