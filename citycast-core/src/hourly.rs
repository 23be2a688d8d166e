//! Today's slice of the forecast window.

use chrono::NaiveDate;

use crate::model::{ForecastEntry, HourlyRow};

/// Keep the entries dated `reference_date`, in upstream order.
///
/// A window that does not cover `reference_date` yields an empty Vec.
pub fn extract_today(entries: &[ForecastEntry], reference_date: NaiveDate) -> Vec<HourlyRow> {
    entries
        .iter()
        .filter(|e| e.timestamp.date() == reference_date)
        .map(|e| HourlyRow {
            time: e.timestamp.format("%H:%M").to_string(),
            temperature_c: e.temperature_c,
            description: e.description.clone(),
        })
        .collect()
}
