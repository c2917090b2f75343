use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::FetchError;
use crate::model::{Coordinates, WeatherReading};
use crate::session::WeatherApi;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// HTTP client for the OpenWeather geocoding, current-conditions and
/// 5-day/3-hour forecast endpoints.
///
/// The API key is injected at construction. A missing key short-circuits
/// every operation with [`FetchError::MissingApiKey`] before any request
/// is sent.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Used by tests to talk to a
    /// local mock server.
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    fn api_key(&self) -> Result<&str, FetchError> {
        self.api_key.as_deref().ok_or(FetchError::MissingApiKey)
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, FetchError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                FetchError::Other(anyhow!(e).context(format!(
                    "Failed to send request to OpenWeather ({what})"
                )))
            })?;

        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::InvalidApiKey);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::LocationNotFound);
        }

        let body = res.text().await.map_err(|e| {
            FetchError::Other(
                anyhow!(e).context(format!("Failed to read OpenWeather {what} response body")),
            )
        })?;

        if !status.is_success() {
            return Err(FetchError::Other(anyhow!(
                "OpenWeather {what} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::Other(anyhow!(e).context(format!("Failed to parse OpenWeather {what} JSON")))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwReading {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwReading>,
}

impl OwReading {
    fn into_reading(self) -> WeatherReading {
        let (description, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        WeatherReading {
            temperature_c: self.main.temp,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            humidity_pct: self.main.humidity,
            description,
            icon,
            observed_at: unix_to_utc(self.dt).unwrap_or_else(Utc::now),
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn geocode(&self, query: &str) -> Result<Coordinates, FetchError> {
        let key = self.api_key()?;
        tracing::debug!(%query, "resolving location");

        let entries: Vec<OwGeoEntry> = self
            .get_json(
                "/geo/1.0/direct",
                &[("q", query), ("limit", "1"), ("appid", key)],
                "geocoding",
            )
            .await?;

        let first = entries
            .into_iter()
            .next()
            .ok_or(FetchError::LocationNotFound)?;

        Ok(Coordinates {
            latitude: first.lat,
            longitude: first.lon,
        })
    }

    async fn current(&self, at: Coordinates) -> Result<WeatherReading, FetchError> {
        let key = self.api_key()?;
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        let parsed: OwReading = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", "metric"),
                    ("appid", key),
                ],
                "current weather",
            )
            .await?;

        Ok(parsed.into_reading())
    }

    async fn forecast(&self, at: Coordinates) -> Result<Vec<WeatherReading>, FetchError> {
        let key = self.api_key()?;
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        let parsed: OwForecastResponse = self
            .get_json(
                "/data/2.5/forecast",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", "metric"),
                    ("appid", key),
                ],
                "5-day forecast",
            )
            .await?;

        Ok(parsed.list.into_iter().map(OwReading::into_reading).collect())
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
