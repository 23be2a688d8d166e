use crate::{
    Config,
    error::FetchError,
    model::{Coordinate, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of forecast windows and city coordinates.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Full forecast window for `city`, in upstream order.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;

    async fn fetch_coordinate(&self, city: &str) -> Result<Coordinate, FetchError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        (**self).fetch_forecast(city).await
    }

    async fn fetch_coordinate(&self, city: &str) -> Result<Coordinate, FetchError> {
        (**self).fetch_coordinate(city).await
    }
}

/// Construct the OpenWeather provider from config.
///
/// A missing key is not an error here; upstream rejects the requests instead.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = config.api_key().unwrap_or_else(|| {
        tracing::warn!(
            "No API key configured; set {} or run `citycast configure`",
            crate::config::API_KEY_ENV
        );
        ""
    });

    Box::new(OpenWeatherProvider::new(
        api_key.to_owned(),
        config.api.base_url.clone(),
        config.api.units.clone(),
        config.display.locale.lang_code().to_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_tolerates_missing_key() {
        let cfg = Config::default();
        let provider = provider_from_config(&cfg);

        assert!(format!("{provider:?}").contains("OpenWeatherProvider"));
    }

    #[test]
    fn provider_from_config_uses_locale_lang() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.display.locale = crate::Locale::English;

        let provider = provider_from_config(&cfg);
        assert!(format!("{provider:?}").contains("lang: \"en\""));
    }
}
