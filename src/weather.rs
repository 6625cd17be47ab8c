use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::WeatherConfig;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("weather response has no current temperature")]
    MissingTemperature,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: Option<f64>,
}

/// What the sidebar weather box shows.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub city: String,
    pub temp_c: Option<i64>,
    pub note: String,
}

pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(8))
            .user_agent("SmartNews/1.0 (Weather)")
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub async fn current_temperature(&self, lat: f64, lon: f64) -> Result<f64, WeatherError> {
        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        let forecast: Forecast = self
            .client
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
                ("temperature_unit", "celsius".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        forecast
            .current_weather
            .and_then(|c| c.temperature)
            .ok_or(WeatherError::MissingTemperature)
    }

    /// Weather at `coords`, else at the configured fallback city.
    pub async fn load(&self, coords: Option<(f64, f64)>) -> WeatherView {
        if let Some((lat, lon)) = coords {
            match self.current_temperature(lat, lon).await {
                Ok(t) => {
                    return WeatherView {
                        city: format!("Lat: {:.2}, Lon: {:.2}", lat, lon),
                        temp_c: Some(round_half_up(t)),
                        note: format!("Now • {}°C", whole_degrees(t)),
                    };
                }
                Err(e) => warn!("Weather lookup at {:.2},{:.2} failed: {}", lat, lon, e),
            }
        }

        match self
            .current_temperature(self.config.fallback_lat, self.config.fallback_lon)
            .await
        {
            Ok(t) => WeatherView {
                city: self.config.fallback_city.clone(),
                temp_c: Some(round_half_up(t)),
                note: "Using fallback".to_string(),
            },
            Err(e) => {
                warn!("Fallback weather lookup failed: {}", e);
                WeatherView {
                    city: self.config.fallback_city.clone(),
                    temp_c: None,
                    note: "Weather unavailable".to_string(),
                }
            }
        }
    }
}

/// Displayed temperature: ties round towards positive infinity.
fn round_half_up(t: f64) -> i64 {
    (t + 0.5).floor() as i64
}

/// Note text: ties round away from zero and small negatives keep their
/// sign, so -2.5 reads "-3" and -0.4 reads "-0".
fn whole_degrees(t: f64) -> String {
    format!("{:.0}", t.round())
}
