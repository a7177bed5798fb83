//! One render cycle: snapshot + selection -> everything the page shows.
//!
//! ```text
//! Dataset ──▶ apply_filters ──┬──▶ compute_kpis ──▶ KPI slots
//!                             └──▶ build_table  ──▶ front table
//! ```

use serde::{Deserialize, Serialize};

use super::aggregate::{compute_kpis, KpiDisplay, Kpis};
use super::filter::apply_filters;
use super::table::{build_table, FrontRow};
use crate::dataset::{Dataset, SnapshotInfo};
use crate::models::FilterSelection;

/// Everything needed to redraw KPIs and table after a filter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Snapshot the view was computed from
    pub snapshot: SnapshotInfo,
    /// Selection the view was computed for
    pub selection: FilterSelection,
    /// Records in the snapshot
    pub total_records: usize,
    /// Records left after filtering
    pub filtered_records: usize,
    pub kpis: Kpis,
    /// `kpis` formatted for the five KPI slots
    pub kpi_display: KpiDisplay,
    /// One row per service front
    pub rows: Vec<FrontRow>,
}

/// Compute the dashboard for `selection` over the full `dataset`.
pub fn build_view(dataset: &Dataset, selection: &FilterSelection) -> DashboardView {
    let filtered = apply_filters(&dataset.records, selection);
    let kpis = compute_kpis(filtered.iter().copied());
    let rows = build_table(filtered.iter().copied());

    DashboardView {
        snapshot: dataset.info.clone(),
        selection: selection.clone(),
        total_records: dataset.records.len(),
        filtered_records: filtered.len(),
        kpi_display: kpis.display(),
        kpis,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSource;
    use crate::parser::parse_bytes;

    const CSV: &str = "\
Contrato;Coordenacao;Frente de Servico;Tipo de Obra;Previsao de Inicio;Extensao Edital (m);Extensao Executivo (m)
A;Norte;F1;Linear;05/07/2026;10;12
A;Norte;F1;Linear;05/07/2026;5;5
B;Sul;F2;Localizada;2026-08-10;;
B;Sul;F3;Linear;01/08/2026;abc;4.5
";

    fn dataset() -> Dataset {
        let parsed = parse_bytes(CSV.as_bytes()).unwrap();
        Dataset::from_parsed(parsed, &DataSource::default())
    }

    #[test]
    fn test_unfiltered_view() {
        let dataset = dataset();
        let view = build_view(&dataset, &FilterSelection::default());

        assert_eq!(view.total_records, 4);
        assert_eq!(view.filtered_records, 4);
        assert_eq!(view.kpis.unique_fronts, 3);
        assert_eq!(view.kpi_display.edital_length, "15.00");
        assert_eq!(view.kpi_display.executive_length, "21.50");
        assert_eq!(view.kpi_display.difference, "6.50");
        assert_eq!(view.kpi_display.localized_count, "1");
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_period_selection() {
        let dataset = dataset();
        let view = build_view(&dataset, &FilterSelection::default().with_period("2026-08"));

        assert_eq!(view.filtered_records, 2);
        assert_eq!(view.kpis.unique_fronts, 2);
        assert_eq!(view.kpi_display.executive_length, "4.50");
        assert_eq!(view.rows[0].front, "F2");
    }

    #[test]
    fn test_unmatched_selection_is_all_zero() {
        let dataset = dataset();
        let view = build_view(&dataset, &FilterSelection::default().with_contract("Z"));

        assert_eq!(view.filtered_records, 0);
        assert_eq!(view.kpis, Kpis::default());
        assert!(view.rows.is_empty());
        assert_eq!(view.kpi_display.difference, "0.00");
    }

    #[test]
    fn test_view_does_not_touch_dataset() {
        let dataset = dataset();
        let before = dataset.records.clone();
        let _ = build_view(&dataset, &FilterSelection::default().with_contract("A"));
        assert_eq!(dataset.records, before);
    }
}
