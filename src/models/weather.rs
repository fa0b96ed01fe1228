use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Current observed conditions, metric units throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: u8,
    pub pressure_hpa: u32,
    pub wind_speed: f64,
    pub feels_like: f64,
    pub temp_max: f64,
    pub temp_min: f64,
    pub condition_code: i32,
    pub condition_main: String,
    pub condition_description: String,
    pub place_name: String,
}

/// A single 3-hour forecast point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub condition_code: i32,
    pub condition_main: String,
    pub temperature: f64,
}

/// One complete fetch cycle's worth of weather data. Immutable once built;
/// a new fetch produces a fresh snapshot that replaces the old one wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub location: Coordinates,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}
