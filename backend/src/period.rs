//! Planned-start dates to `YYYY-MM` period keys and their labels.

use crate::error::PeriodError;

/// Portuguese month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

/// Derive the period key of a date string.
///
/// `DD/MM/YYYY` gives `YYYY-MM` with the month zero-padded; `YYYY-MM[-..]`
/// gives its first two parts. The slash form is tried first; when it lacks
/// a month or year the hyphen form is tried next. Anything else gives `""`.
pub fn extract_period(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    if date.contains('/') {
        let mut parts = date.split('/');
        let _day = parts.next();
        let month = parts.next().unwrap_or("");
        let year = parts.next().unwrap_or("");
        if !month.is_empty() && !year.is_empty() {
            return format!("{year}-{month:0>2}");
        }
    }

    if date.contains('-') {
        let mut parts = date.split('-');
        if let (Some(year), Some(month)) = (parts.next(), parts.next()) {
            return format!("{year}-{month}");
        }
    }

    String::new()
}

/// Human-readable label of a period key, e.g. `"Julho/2026"`.
pub fn format_period_label(key: &str) -> Result<String, PeriodError> {
    let (year, month) = key
        .split_once('-')
        .ok_or_else(|| PeriodError::Malformed(key.to_string()))?;

    let month: i64 = month
        .parse()
        .map_err(|_| PeriodError::Malformed(key.to_string()))?;

    if !(1..=12).contains(&month) {
        return Err(PeriodError::MonthOutOfRange {
            key: key.to_string(),
            month,
        });
    }

    Ok(format!("{}/{year}", MONTH_NAMES[(month - 1) as usize]))
}

/// Label for display, falling back to the raw key when it has no valid month.
pub fn period_label_or_key(key: &str) -> String {
    format_period_label(key).unwrap_or_else(|_| key.to_string())
}
