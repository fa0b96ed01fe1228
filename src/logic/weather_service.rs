use crate::config::Config;
use crate::datasources::{GeoIpClient, OpenWeatherMapClient, WeatherQuery};
use crate::error::Result;
use crate::models::{Coordinates, WeatherSnapshot};

/// Outcome of location resolution. When geolocation fails the configured
/// default is used and a user-facing notice explains why.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub notice: Option<String>,
}

/// Owns the weather and geolocation clients and produces fresh snapshots.
/// One fetch cycle at a time; the caller awaits each operation inline so no
/// duplicate requests are ever in flight.
pub struct WeatherService {
    config: Config,
    openweathermap: OpenWeatherMapClient,
    geoip: Option<GeoIpClient>,
}

impl WeatherService {
    pub fn new(config: Config) -> Self {
        let openweathermap = OpenWeatherMapClient::new(config.openweathermap.api_key.clone());

        let geoip = if config.location.geolocate {
            match GeoIpClient::new() {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("Failed to create geolocation client: {}", e);
                    None
                }
            }
        } else {
            tracing::info!("Geolocation disabled - using configured default location");
            None
        };

        Self {
            config,
            openweathermap,
            geoip,
        }
    }

    /// Resolve the user's coordinates, falling back to the configured
    /// default (with a notice) when geolocation is unavailable or fails.
    pub async fn resolve_location(&self) -> ResolvedLocation {
        let Some(ref geoip) = self.geoip else {
            return ResolvedLocation {
                coordinates: self.config.default_coordinates(),
                notice: None,
            };
        };

        match geoip.locate().await {
            Ok(location) => {
                tracing::info!(
                    "Geolocation successful: {} ({})",
                    location.city,
                    location.coordinates
                );
                ResolvedLocation {
                    coordinates: location.coordinates,
                    notice: None,
                }
            }
            Err(e) => {
                tracing::warn!("Geolocation failed: {}", e);
                ResolvedLocation {
                    coordinates: self.config.default_coordinates(),
                    notice: Some(
                        "Location unavailable - showing default location".to_string(),
                    ),
                }
            }
        }
    }

    /// Fetch a fresh snapshot for the active coordinates.
    pub async fn refresh(&self, coordinates: Coordinates) -> Result<WeatherSnapshot> {
        let snapshot = self
            .openweathermap
            .fetch_snapshot(&WeatherQuery::Coordinates(coordinates))
            .await?;
        tracing::debug!("Weather snapshot updated for {}", snapshot.location);
        Ok(snapshot)
    }

    /// Fetch a fresh snapshot for a searched city. The snapshot carries the
    /// resolved coordinates, which become the active location on success.
    pub async fn search_city(&self, name: &str) -> Result<WeatherSnapshot> {
        let snapshot = self
            .openweathermap
            .fetch_snapshot(&WeatherQuery::CityName(name.to_string()))
            .await?;
        tracing::debug!(
            "City search '{}' resolved to {}",
            name,
            snapshot.location
        );
        Ok(snapshot)
    }

    pub async fn test_connection(&self) -> bool {
        self.openweathermap
            .test_connection(self.config.default_coordinates())
            .await
            .unwrap_or(false)
    }
}
