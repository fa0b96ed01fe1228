use crate::error::{Result, SkycastError};
use crate::models::{Coordinates, CurrentConditions, ForecastEntry, WeatherSnapshot};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// How to address a weather request: geolocation-driven refreshes query by
/// coordinates, manual searches query by city name.
#[derive(Debug, Clone)]
pub enum WeatherQuery {
    Coordinates(Coordinates),
    CityName(String),
}

impl WeatherQuery {
    fn query_params(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = match self {
            WeatherQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
            WeatherQuery::CityName(name) => vec![("q", name.clone())],
        };
        params.push(("appid", api_key.to_string()));
        params.push(("units", "metric".to_string()));
        params
    }
}

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    api_key: String,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    name: String,
    coord: OwmCoord,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: i32,
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmForecastMain,
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastMain {
    temp: f64,
}

impl OpenWeatherMapClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Fetch current conditions and the 5-day/3-hour forecast for one query.
    /// Both requests must succeed before a snapshot is produced.
    pub async fn fetch_snapshot(&self, query: &WeatherQuery) -> Result<WeatherSnapshot> {
        let (current, location) = self.fetch_current(query).await?;
        let forecast = self.fetch_forecast(query).await?;

        Ok(WeatherSnapshot {
            fetched_at: Utc::now(),
            location,
            current,
            forecast,
        })
    }

    /// Fetch current weather. Returns the observed conditions plus the
    /// resolved coordinates, which become the active location after a
    /// by-name search.
    pub async fn fetch_current(
        &self,
        query: &WeatherQuery,
    ) -> Result<(CurrentConditions, Coordinates)> {
        let url = format!("{}/weather", API_BASE_URL);
        let body = self.get(&url, query).await?;

        let parsed: OwmCurrentResponse = serde_json::from_str(&body)?;
        Ok(convert_current(parsed))
    }

    /// Fetch the 3-hour-interval forecast series, in upstream order.
    pub async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<Vec<ForecastEntry>> {
        let url = format!("{}/forecast", API_BASE_URL);
        let body = self.get(&url, query).await?;

        let parsed: OwmForecastResponse = serde_json::from_str(&body)?;
        Ok(parsed.list.iter().map(convert_forecast_item).collect())
    }

    /// Probe the API with the given coordinates.
    pub async fn test_connection(&self, coords: Coordinates) -> Result<bool> {
        let url = format!("{}/weather", API_BASE_URL);
        let query = WeatherQuery::Coordinates(coords);

        let response = self
            .client
            .get(&url)
            .query(&query.query_params(&self.api_key))
            .send()
            .await
            .map_err(|e| {
                SkycastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    async fn get(&self, url: &str, query: &WeatherQuery) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(&query.query_params(&self.api_key))
            .send()
            .await
            .map_err(|e| {
                SkycastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            // A by-name miss is its own condition so the search overlay can
            // show a scoped message without disturbing the displayed data.
            if status == reqwest::StatusCode::NOT_FOUND {
                if let WeatherQuery::CityName(name) = query {
                    return Err(SkycastError::CityNotFound(name.clone()));
                }
            }
            let body = response.text().await.unwrap_or_default();
            return Err(SkycastError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.text().await.map_err(|e| {
            SkycastError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
        })
    }
}

fn convert_current(response: OwmCurrentResponse) -> (CurrentConditions, Coordinates) {
    let (condition_code, condition_main, condition_description) = response
        .weather
        .first()
        .map(|w| (w.id, w.main.clone(), w.description.clone()))
        .unwrap_or((0, "Unknown".to_string(), String::new()));

    let current = CurrentConditions {
        temperature: response.main.temp,
        humidity: response.main.humidity,
        pressure_hpa: response.main.pressure,
        wind_speed: response.wind.speed,
        feels_like: response.main.feels_like,
        temp_max: response.main.temp_max,
        temp_min: response.main.temp_min,
        condition_code,
        condition_main,
        condition_description,
        place_name: response.name,
    };
    let coords = Coordinates::new(response.coord.lat, response.coord.lon);

    (current, coords)
}

fn convert_forecast_item(item: &OwmForecastItem) -> ForecastEntry {
    let timestamp = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);

    let (condition_code, condition_main) = item
        .weather
        .first()
        .map(|w| (w.id, w.main.clone()))
        .unwrap_or((0, "Unknown".to_string()));

    ForecastEntry {
        timestamp,
        condition_code,
        condition_main,
        temperature: item.main.temp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_JSON: &str = r#"{
        "coord": {"lon": -74.006, "lat": 40.7128},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
        "main": {
            "temp": 21.64,
            "feels_like": 21.3,
            "temp_min": 19.8,
            "temp_max": 23.1,
            "pressure": 1014,
            "humidity": 52
        },
        "wind": {"speed": 3.6, "deg": 220},
        "dt": 1717243200,
        "name": "New York"
    }"#;

    const FORECAST_JSON: &str = r#"{
        "list": [
            {
                "dt": 1717254000,
                "main": {"temp": 21.6, "feels_like": 21.2, "temp_min": 20.0,
                         "temp_max": 22.0, "pressure": 1014, "humidity": 50},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain"}]
            },
            {
                "dt": 1717264800,
                "main": {"temp": 18.2, "feels_like": 17.9, "temp_min": 17.0,
                         "temp_max": 19.0, "pressure": 1015, "humidity": 61},
                "weather": [{"id": 801, "main": "Clouds", "description": "few clouds"}]
            }
        ],
        "city": {"name": "New York", "country": "US"}
    }"#;

    #[test]
    fn decode_current_response() {
        let parsed: OwmCurrentResponse = serde_json::from_str(CURRENT_JSON).unwrap();
        let (current, coords) = convert_current(parsed);

        assert_eq!(current.place_name, "New York");
        assert_eq!(current.condition_code, 800);
        assert_eq!(current.condition_main, "Clear");
        assert_eq!(current.condition_description, "clear sky");
        assert_eq!(current.humidity, 52);
        assert_eq!(current.pressure_hpa, 1014);
        assert!((current.temperature - 21.64).abs() < f64::EPSILON);
        assert!((current.wind_speed - 3.6).abs() < f64::EPSILON);
        assert!((coords.latitude - 40.7128).abs() < f64::EPSILON);
    }

    #[test]
    fn decode_current_response_without_weather_array() {
        let json = CURRENT_JSON.replace(
            r#"[{"id": 800, "main": "Clear", "description": "clear sky"}]"#,
            "[]",
        );
        let parsed: OwmCurrentResponse = serde_json::from_str(&json).unwrap();
        let (current, _) = convert_current(parsed);

        assert_eq!(current.condition_code, 0);
        assert_eq!(current.condition_main, "Unknown");
    }

    #[test]
    fn decode_forecast_response_preserves_order() {
        let parsed: OwmForecastResponse = serde_json::from_str(FORECAST_JSON).unwrap();
        let entries: Vec<_> = parsed.list.iter().map(convert_forecast_item).collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].condition_code, 500);
        assert_eq!(entries[0].condition_main, "Rain");
        assert!((entries[0].temperature - 21.6).abs() < f64::EPSILON);
        assert_eq!(entries[1].condition_code, 801);
        assert!(entries[0].timestamp < entries[1].timestamp);
    }

    #[test]
    fn query_params_by_coordinates() {
        let query = WeatherQuery::Coordinates(Coordinates::new(40.7128, -74.006));
        let params = query.query_params("KEY");

        assert!(params.contains(&("lat", "40.7128".to_string())));
        assert!(params.contains(&("lon", "-74.006".to_string())));
        assert!(params.contains(&("appid", "KEY".to_string())));
        assert!(params.contains(&("units", "metric".to_string())));
    }

    #[test]
    fn query_params_by_city_name() {
        let query = WeatherQuery::CityName("Reykjavik".to_string());
        let params = query.query_params("KEY");

        assert!(params.contains(&("q", "Reykjavik".to_string())));
        assert!(params.contains(&("units", "metric".to_string())));
    }
}
