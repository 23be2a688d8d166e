//! Plain-text rendering of a [`DashboardView`].

use std::fmt::Write as _;

use citycast_core::{
    DailyPanel, DailySummary, DashboardView, HourlyPanel, HourlyRow, Locale, MapView, Texts,
};

pub fn view(view: &DashboardView, texts: &Texts, locale: Locale) -> String {
    let mut out = String::new();

    match view {
        DashboardView::Prompt { message, map } => {
            let _ = writeln!(out, "ℹ {message}\n");
            map_panel(&mut out, map, texts);
        }
        DashboardView::Tabs { city, hourly, daily, map } => {
            let _ = writeln!(out, "── {city} ──\n");

            let _ = writeln!(out, "{}", texts.hourly_tab);
            match hourly {
                HourlyPanel::Table { rows, advisory } => {
                    hourly_table(&mut out, rows, texts);
                    let _ = writeln!(out, "ℹ {}", advisory.message(locale));
                }
                HourlyPanel::Warning(w) => {
                    let _ = writeln!(out, "⚠ {w}");
                }
            }
            out.push('\n');

            let _ = writeln!(out, "{}", texts.daily_tab);
            match daily {
                DailyPanel::Table(days) => daily_table(&mut out, days, texts),
                DailyPanel::Warning(w) => {
                    let _ = writeln!(out, "⚠ {w}");
                }
            }
            out.push('\n');

            map_panel(&mut out, map, texts);
        }
    }

    out
}

fn hourly_table(out: &mut String, rows: &[HourlyRow], texts: &Texts) {
    let [time, temp, weather] = texts.hourly_columns;
    let _ = writeln!(out, "  {time:<5}  {temp:>8}  {weather}");
    for row in rows {
        let _ = writeln!(
            out,
            "  {:<5}  {:>8}  {}",
            row.time, row.temperature_c, row.description
        );
    }
}

fn daily_table(out: &mut String, days: &[DailySummary], texts: &Texts) {
    let [date, temp, weather] = texts.daily_columns;
    let _ = writeln!(out, "  {date:<10}  {temp:>8}  {weather}");
    for day in days {
        let _ = writeln!(
            out,
            "  {:<10}  {:>8.1}  {}",
            day.date.format("%Y-%m-%d"),
            day.avg_temperature_c,
            day.description
        );
    }
}

fn map_panel(out: &mut String, map: &MapView, texts: &Texts) {
    let [r, g, b, a] = map.marker.rgba;
    let _ = writeln!(out, "{}", texts.map_heading);
    let _ = writeln!(
        out,
        "  ● {:.4}, {:.4}  zoom {:.1}",
        map.center.latitude, map.center.longitude, map.zoom
    );
    let _ = writeln!(
        out,
        "  marker rgba({r}, {g}, {b}, {a}) radius {} m",
        map.marker.radius_m
    );
    let _ = writeln!(out, "  {}", map.osm_link());
}
