//! Core library for the `citycast` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather forecast and geocode clients
//! - The hourly and daily views derived from a forecast window
//! - The dashboard coordinator and its session state
//!
//! It is used by `citycast-cli`, but can also back other front ends.

pub mod advisory;
pub mod config;
pub mod daily;
pub mod dashboard;
pub mod error;
pub mod hourly;
pub mod model;
pub mod provider;

pub use advisory::{Advisory, Locale, RainKeywords};
pub use config::Config;
pub use daily::aggregate_daily;
pub use dashboard::{
    DailyPanel, Dashboard, DashboardView, HourlyPanel, MapView, Marker, Session, Texts,
};
pub use error::{ErrorKind, FetchError};
pub use hourly::extract_today;
pub use model::{Coordinate, DailySummary, ForecastEntry, HourlyRow};
pub use provider::{WeatherProvider, provider_from_config};
