use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::FetchError,
    model::{Coordinate, ForecastEntry},
};

use super::WeatherProvider;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: String,
    lang: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("lang", &self.lang)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, units: String, lang: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            units,
            lang,
            http: Client::new(),
        }
    }

    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::upstream(format!(
                "OpenWeather {endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
}

impl TryFrom<OwForecastEntry> for ForecastEntry {
    type Error = FetchError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
            .map_err(|e| FetchError::upstream(format!("bad dt_txt '{}': {e}", entry.dt_txt)))?;

        let description = entry
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| {
                FetchError::upstream(format!("no weather descriptor at {}", entry.dt_txt))
            })?;

        Ok(ForecastEntry {
            timestamp,
            temperature_c: entry.main.temp,
            description,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let body = self
            .get(
                "forecast",
                &[
                    ("q", city),
                    ("appid", self.api_key.as_str()),
                    ("units", self.units.as_str()),
                    ("lang", self.lang.as_str()),
                ],
            )
            .await
            .inspect_err(|e| debug!(error = %e, "forecast fetch failed"))?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        let entries = parsed
            .list
            .into_iter()
            .map(ForecastEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = entries.len(), "forecast window received");
        Ok(entries)
    }

    #[instrument(level = "debug", skip(self))]
    async fn fetch_coordinate(&self, city: &str) -> Result<Coordinate, FetchError> {
        let body = self
            .get("weather", &[("q", city), ("appid", self.api_key.as_str())])
            .await
            .inspect_err(|e| debug!(error = %e, "coordinate lookup failed"))?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        debug!(lat = parsed.coord.lat, lon = parsed.coord.lon, "coordinate resolved");
        Ok(Coordinate::new(parsed.coord.lat, parsed.coord.lon))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
