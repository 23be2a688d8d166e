//! Turns a city query into the three dashboard panels.
//!
//! The [`Dashboard`] owns the provider and the [`Session`]; presentation only
//! ever sees the finished [`DashboardView`], never a fetch error.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    Config,
    advisory::{Advisory, Locale, RainKeywords},
    daily::aggregate_daily,
    hourly::extract_today,
    model::{Coordinate, DailySummary, HourlyRow},
    provider::WeatherProvider,
};

const MIN_ZOOM: f64 = 0.0;
const MAX_ZOOM: f64 = 20.0;
const ZOOM_STEP: f64 = 1.0;

/// Interactive state that survives between queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    previous_city: String,
    zoom: f64,
    default_zoom: f64,
}

impl Session {
    pub fn new(default_zoom: f64) -> Self {
        Self {
            previous_city: String::new(),
            zoom: default_zoom,
            default_zoom,
        }
    }

    pub fn previous_city(&self) -> &str {
        &self.previous_city
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Record a submitted city. A new non-empty city resets the zoom.
    ///
    /// Returns `true` when the reset happened.
    pub fn observe_city(&mut self, city: &str) -> bool {
        if city.is_empty() || city == self.previous_city {
            return false;
        }
        self.previous_city = city.to_string();
        self.zoom = self.default_zoom;
        true
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }
}

/// Fixed style of the single map marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub rgba: [u8; 4],
    pub radius_m: u32,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            rgba: [0, 128, 255, 160],
            radius_m: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
    pub marker: Marker,
}

impl MapView {
    /// OpenStreetMap link centred on the marker at the current zoom.
    pub fn osm_link(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = self.center.latitude,
            lon = self.center.longitude,
            zoom = self.zoom.round() as i64,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HourlyPanel {
    Table {
        rows: Vec<HourlyRow>,
        advisory: Advisory,
    },
    Warning(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DailyPanel {
    Table(Vec<DailySummary>),
    Warning(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No city entered yet.
    Prompt { message: &'static str, map: MapView },
    Tabs {
        city: String,
        hourly: HourlyPanel,
        daily: DailyPanel,
        map: MapView,
    },
}

impl DashboardView {
    pub fn map(&self) -> &MapView {
        match self {
            DashboardView::Prompt { map, .. } | DashboardView::Tabs { map, .. } => map,
        }
    }
}

/// Fixed dashboard texts for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texts {
    pub title: &'static str,
    pub hourly_tab: &'static str,
    pub daily_tab: &'static str,
    pub map_heading: &'static str,
    pub prompt: &'static str,
    pub hourly_warning: &'static str,
    pub daily_warning: &'static str,
    pub input_label: &'static str,
    pub hourly_columns: [&'static str; 3],
    pub daily_columns: [&'static str; 3],
}

impl Texts {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Korean => Self {
                title: "🌤️ 날씨 정보 (OpenWeatherMap)",
                hourly_tab: "📅 오늘 시간별 날씨",
                daily_tab: "📆 5일간 일별 요약",
                map_heading: "🗺️ 지도",
                prompt: "왼쪽 지도에서 위치를 참고해 도시 이름을 입력하세요.",
                hourly_warning: "오늘의 시간별 날씨 데이터를 가져올 수 없습니다.",
                daily_warning: "5일간 일별 날씨 데이터를 가져올 수 없습니다.",
                input_label: "도시 이름을 입력하세요 (예: Seoul, Busan, Jeju)",
                hourly_columns: ["시간", "기온(°C)", "날씨"],
                daily_columns: ["날짜", "평균기온(°C)", "대표날씨"],
            },
            Locale::English => Self {
                title: "🌤️ Weather (OpenWeatherMap)",
                hourly_tab: "📅 Today, hourly",
                daily_tab: "📆 5-day summary",
                map_heading: "🗺️ Map",
                prompt: "Use the map as a reference and enter a city name.",
                hourly_warning: "Could not load today's hourly weather.",
                daily_warning: "Could not load the 5-day daily weather.",
                input_label: "Enter a city name (e.g. Seoul, Busan, Jeju)",
                hourly_columns: ["Time", "Temp(°C)", "Weather"],
                daily_columns: ["Date", "Avg temp(°C)", "Weather"],
            },
        }
    }
}

#[derive(Debug)]
pub struct Dashboard<P> {
    provider: P,
    session: Session,
    locale: Locale,
    keywords: RainKeywords,
    fallback: Coordinate,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        let keywords = config.rain_keywords();
        debug!(
            locale = ?config.display.locale,
            keywords = ?keywords.keywords(),
            "dashboard ready"
        );

        Self {
            provider,
            session: Session::new(config.map.default_zoom),
            locale: config.display.locale,
            keywords,
            fallback: config.map.fallback,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn texts(&self) -> Texts {
        Texts::for_locale(self.locale)
    }

    /// Build the view for `city` as of `today`.
    ///
    /// Issues the hourly forecast, daily forecast and geocode requests one
    /// after another; nothing is shared between them.
    pub async fn render(&mut self, raw_city: &str, today: NaiveDate) -> DashboardView {
        let city = raw_city.trim();
        let texts = self.texts();

        if city.is_empty() {
            return DashboardView::Prompt {
                message: texts.prompt,
                map: MapView {
                    center: self.fallback,
                    zoom: self.session.default_zoom,
                    marker: Marker::default(),
                },
            };
        }

        // The session compares what was typed, so "Seoul " counts as a new city.
        if self.session.observe_city(raw_city) {
            info!(city, zoom = self.session.zoom(), "new city, zoom reset");
        }

        let hourly = self.hourly_panel(city, today, &texts).await;
        let daily = self.daily_panel(city, &texts).await;
        let center = self.resolve_coordinate(city).await;

        DashboardView::Tabs {
            city: city.to_string(),
            hourly,
            daily,
            map: MapView {
                center,
                zoom: self.session.zoom(),
                marker: Marker::default(),
            },
        }
    }

    async fn hourly_panel(&self, city: &str, today: NaiveDate, texts: &Texts) -> HourlyPanel {
        let rows = match self.provider.fetch_forecast(city).await {
            Ok(entries) => extract_today(&entries, today),
            Err(e) => {
                warn!(city, error = %e, "hourly forecast unavailable");
                Vec::new()
            }
        };

        if rows.is_empty() {
            return HourlyPanel::Warning(texts.hourly_warning);
        }

        let advisory = Advisory::for_rows(&rows, &self.keywords);
        HourlyPanel::Table { rows, advisory }
    }

    async fn daily_panel(&self, city: &str, texts: &Texts) -> DailyPanel {
        let days = match self.provider.fetch_forecast(city).await {
            Ok(entries) => aggregate_daily(&entries),
            Err(e) => {
                warn!(city, error = %e, "daily forecast unavailable");
                Vec::new()
            }
        };

        if days.is_empty() {
            DailyPanel::Warning(texts.daily_warning)
        } else {
            DailyPanel::Table(days)
        }
    }

    async fn resolve_coordinate(&self, city: &str) -> Coordinate {
        self.provider
            .fetch_coordinate(city)
            .await
            .unwrap_or_else(|e| {
                debug!(city, error = %e, "geocode failed, using fallback center");
                self.fallback
            })
    }
}
