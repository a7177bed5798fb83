//! One table row per service front.
//!
//! Rows are keyed by `(contract, front)`; the first record of each key is
//! projected and later records with the same key are ignored, not merged.

use askama::Template;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::CsvResult;
use crate::models::{fields, Record};
use crate::parser::DELIMITER;

/// Projection of the first-seen record of a service front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontRow {
    pub contract: String,
    pub coordination: String,
    pub front: String,
    pub work_type: String,
    pub planned_start: String,
    pub status_linear: String,
    pub status_hydromechanical: String,
    pub status_electrical: String,
    pub status_civil: String,
    pub status_energy_entry: String,
    pub economies: String,
    pub scope: String,
}

/// Column headings as shown on the dashboard, in column order.
pub const COLUMN_HEADINGS: [&str; 12] = [
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

impl FrontRow {
    fn from_record(record: &Record) -> Self {
        let field = |key: &str| record.get(key).to_string();
        Self {
            contract: field(fields::CONTRACT),
            coordination: field(fields::COORDINATION),
            front: field(fields::FRONT),
            work_type: field(fields::WORK_TYPE),
            planned_start: field(fields::PLANNED_START),
            status_linear: field(fields::STATUS_LINEAR),
            status_hydromechanical: field(fields::STATUS_HYDROMECHANICAL),
            status_electrical: field(fields::STATUS_ELECTRICAL),
            status_civil: field(fields::STATUS_CIVIL),
            status_energy_entry: field(fields::STATUS_ENERGY_ENTRY),
            economies: field(fields::ECONOMIES),
            scope: field(fields::SCOPE),
        }
    }

    /// Cell values in [`COLUMN_HEADINGS`] order.
    pub fn cells(&self) -> [&str; 12] {
        [
            self.contract.as_str(),
            self.coordination.as_str(),
            self.front.as_str(),
            self.work_type.as_str(),
            self.planned_start.as_str(),
            self.status_linear.as_str(),
            self.status_hydromechanical.as_str(),
            self.status_electrical.as_str(),
            self.status_civil.as_str(),
            self.status_energy_entry.as_str(),
            self.economies.as_str(),
            self.scope.as_str(),
        ]
    }
}

/// Deduplicate `records` by front, keeping first-seen order.
pub fn build_table<'a, I>(records: I) -> Vec<FrontRow>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter(|record| seen.insert(record.front_key()))
        .map(FrontRow::from_record)
        .collect()
}

#[derive(Template)]
#[template(path = "table.html")]
struct TableTemplate<'a> {
    headings: &'a [&'a str],
    rows: &'a [FrontRow],
}

/// Render rows as an HTML `<table>`; every value is escaped by the template.
pub fn render_table_html(rows: &[FrontRow]) -> askama::Result<String> {
    TableTemplate {
        headings: &COLUMN_HEADINGS,
        rows,
    }
    .render()
}

/// Export rows as a `;`-delimited CSV with a heading line.
pub fn write_table_csv<W: Write>(rows: &[FrontRow], writer: W) -> CsvResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(DELIMITER as u8)
        .from_writer(writer);

    csv.write_record(COLUMN_HEADINGS)?;
    for row in rows {
        csv.write_record(row.cells())?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(contract: &str, front: &str, status: &str) -> Record {
        [
            ("contrato", contract),
            ("frentedeservico", front),
            ("tipodeobra", "Linear"),
            ("statusprojetoexecutivocivil", status),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let records = vec![row("A", "F1", "Em análise"), row("A", "F1", "Aprovado")];
        let table = build_table(&records);

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].status_civil, "Em análise");
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            row("B", "F2", ""),
            row("A", "F1", ""),
            row("B", "F2", ""),
            row("A", "F2", ""),
        ];
        let table = build_table(&records);

        let keys: Vec<(&str, &str)> = table
            .iter()
            .map(|r| (r.contract.as_str(), r.front.as_str()))
            .collect();
        assert_eq!(keys, vec![("B", "F2"), ("A", "F1"), ("A", "F2")]);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let records = vec![row("A", "F1", "")];
        let table = build_table(&records);

        assert_eq!(table[0].coordination, "");
        assert_eq!(table[0].scope, "");
        assert_eq!(table[0].work_type, "Linear");
    }

    #[test]
    fn test_html_escapes_values() {
        let records = vec![row("A<script>", "F&1", "")];
        let html = render_table_html(&build_table(&records)).unwrap();

        assert!(html.contains("<th>Previsão de Início</th>"));
        assert!(html.contains("<td>A&lt;script&gt;</td>"));
        assert!(html.contains("<td>F&amp;1</td>"));
        assert!(!html.contains("<script>"));
        assert_eq!(html.matches("<tr><td>").count(), 1);
    }

    #[test]
    fn test_html_escapes_quotes() {
        let records = vec![row("A", "F\"1'", "")];
        let html = render_table_html(&build_table(&records)).unwrap();

        assert!(html.contains("&quot;"));
        assert!(!html.contains("F\"1'"));
    }

    #[test]
    fn test_html_empty_table() {
        let html = render_table_html(&[]).unwrap();
        assert!(html.starts_with("<table>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_csv_export() {
        let records = vec![row("A", "F1", "Ok")];
        let mut out = Vec::new();
        write_table_csv(&build_table(&records), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Contrato;Coordenação;Frente"));
        assert_eq!(lines.next().unwrap(), "A;;F1;Linear;;;;;Ok;;;");
        assert!(lines.next().is_none());
    }
}
