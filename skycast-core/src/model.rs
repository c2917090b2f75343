use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair resolved from a free-text query.
///
/// Ephemeral: resolved once per search and not cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One weather reading, either the current conditions or a single 3-hour
/// forecast slot. Temperatures are metric (°C).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub description: String,
    /// OpenWeather icon id, e.g. "10d".
    pub icon: String,
    pub observed_at: DateTime<Utc>,
}

/// Forecast slots appended after the current reading in the recent window.
pub const RECENT_FORECAST_SLOTS: usize = 7;

/// Trailing forecast slots shown in the future window.
pub const FUTURE_FORECAST_SLOTS: usize = 8;

/// Everything fetched for one completed search. Discarded when the next
/// search lands; nothing is persisted.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    /// The trimmed query the user submitted.
    pub query: String,
    pub current: WeatherReading,
    /// Ordered 3-hour forecast slots.
    pub forecast: Vec<WeatherReading>,
}

impl WeatherBundle {
    /// Recent trend: the current reading followed by the first
    /// [`RECENT_FORECAST_SLOTS`] forecast slots.
    pub fn recent_window(&self) -> Vec<WeatherReading> {
        let mut window = Vec::with_capacity(RECENT_FORECAST_SLOTS + 1);
        window.push(self.current.clone());
        window.extend(self.forecast.iter().take(RECENT_FORECAST_SLOTS).cloned());
        window
    }

    /// Upcoming trend: the last [`FUTURE_FORECAST_SLOTS`] forecast slots.
    /// A forecast shorter than that simply yields a shorter window.
    pub fn future_window(&self) -> Vec<WeatherReading> {
        let skip = self.forecast.len().saturating_sub(FUTURE_FORECAST_SLOTS);
        self.forecast[skip..].to_vec()
    }
}
