use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One 3-hour slot of the upstream forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub description: String,
}

/// A forecast slot that falls on the reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRow {
    /// Zero-padded 24-hour "HH:MM".
    pub time: String,
    pub temperature_c: f64,
    pub description: String,
}

/// Per-date rollup of the forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Mean of the day's temperatures, rounded to one decimal.
    pub avg_temperature_c: f64,
    /// Most frequent description of the day.
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Map center used when no city is given or geocoding fails.
    pub const FALLBACK: Coordinate = Coordinate { latitude: 36.5, longitude: 127.8 };

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::FALLBACK
    }
}
