use crate::error::{Result, SkycastError};
use crate::models::Coordinates;
use serde::Deserialize;
use std::time::Duration;

const GEOIP_URL: &str = "http://ip-api.com/json";

/// IP-based geolocation lookup. Single-shot with a short timeout so an
/// unreachable endpoint degrades to the configured fallback instead of
/// stalling startup.
pub struct GeoIpClient {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    city: String,
}

#[derive(Debug, Clone)]
pub struct GeoLocation {
    pub coordinates: Coordinates,
    pub city: String,
}

impl GeoIpClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(1500))
            .timeout(Duration::from_secs(4))
            .build()?;

        Ok(Self { client })
    }

    pub async fn locate(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(GEOIP_URL)
            .send()
            .await
            .map_err(|e| SkycastError::Geolocation(format!("lookup failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkycastError::Geolocation(format!(
                "lookup returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SkycastError::Geolocation(format!("lookup failed: {}", e)))?;

        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<GeoLocation> {
    let parsed: GeoIpResponse = serde_json::from_str(body)
        .map_err(|e| SkycastError::Geolocation(format!("invalid response: {}", e)))?;

    if parsed.status != "success" {
        return Err(SkycastError::Geolocation(format!(
            "lookup status '{}'",
            parsed.status
        )));
    }

    Ok(GeoLocation {
        coordinates: Coordinates::new(parsed.lat, parsed.lon),
        city: parsed.city,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_successful_lookup() {
        let body = r#"{
            "status": "success",
            "country": "United States",
            "city": "Queens",
            "lat": 40.7282,
            "lon": -73.7949,
            "query": "203.0.113.9"
        }"#;
        let location = parse_response(body).unwrap();

        assert_eq!(location.city, "Queens");
        assert!((location.coordinates.latitude - 40.7282).abs() < f64::EPSILON);
        assert!((location.coordinates.longitude + 73.7949).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_failed_lookup() {
        let body = r#"{"status": "fail", "message": "private range"}"#;
        let err = parse_response(body).unwrap_err();
        assert!(err.to_string().contains("fail"));
    }

    #[test]
    fn parse_garbage_is_an_error() {
        assert!(parse_response("not json").is_err());
    }
}
