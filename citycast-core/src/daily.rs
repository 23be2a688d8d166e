//! Per-day rollup of the forecast window.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{DailySummary, ForecastEntry};

#[derive(Debug, Default)]
struct DayBucket<'a> {
    temperatures: Vec<f64>,
    descriptions: Vec<&'a str>,
}

/// Group entries by calendar date and summarise each day.
///
/// Days come out in the order they are first seen in `entries`.
pub fn aggregate_daily(entries: &[ForecastEntry]) -> Vec<DailySummary> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut buckets: HashMap<NaiveDate, DayBucket<'_>> = HashMap::new();

    for entry in entries {
        let date = entry.timestamp.date();
        let bucket = buckets.entry(date).or_insert_with(|| {
            order.push(date);
            DayBucket::default()
        });
        bucket.temperatures.push(entry.temperature_c);
        bucket.descriptions.push(entry.description.as_str());
    }

    order
        .into_iter()
        .filter_map(|date| {
            let bucket = buckets.remove(&date)?;
            Some(DailySummary {
                date,
                avg_temperature_c: round1(mean(&bucket.temperatures)),
                description: stable_mode(&bucket.descriptions)?.to_string(),
            })
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Most frequent item; on a tie the one seen first wins.
fn stable_mode<'a>(items: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (item, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((item, n));
        }
    }
    best.map(|(item, _)| item)
}
